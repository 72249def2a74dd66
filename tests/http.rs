use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct WeekView {
    week_number: i64,
    start_date: String,
    end_date: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct CalendarView {
    month_label: String,
    prev_enabled: bool,
    weeks: Vec<WeekView>,
}

#[derive(Debug, Deserialize)]
struct StatsView {
    total_credit: f64,
    milestone_count: u64,
    current_streak: u64,
}

#[derive(Debug, Deserialize)]
struct OverlayView {
    state: String,
    title: Option<String>,
    markers: [bool; 5],
}

#[derive(Debug, Deserialize)]
struct TrackerView {
    calendar: CalendarView,
    stats: StatsView,
    overlay: OverlayView,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "week_tracker_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/stats")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_week_tracker"))
        .env("PORT", port.to_string())
        .env("TRACKER_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn post_view(client: &Client, url: String, body: serde_json::Value) -> TrackerView {
    let response = client.post(url).json(&body).send().await.unwrap();
    assert!(response.status().is_success(), "{}", response.status());
    response.json().await.unwrap()
}

async fn post_view_empty(client: &Client, url: String) -> TrackerView {
    let response = client.post(url).send().await.unwrap();
    assert!(response.status().is_success(), "{}", response.status());
    response.json().await.unwrap()
}

fn week<'a>(view: &'a TrackerView, start_date: &str) -> &'a WeekView {
    view.calendar
        .weeks
        .iter()
        .find(|week| week.start_date == start_date)
        .unwrap_or_else(|| panic!("week {start_date} not in window"))
}

#[tokio::test]
async fn http_select_partial_records_week() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before: StatsView = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let view = post_view(
        &client,
        format!("{}/api/overlay/open", server.base_url),
        serde_json::json!({ "week_start": "2025-09-15" }),
    )
    .await;
    assert_eq!(view.overlay.state, "selecting");
    assert_eq!(view.overlay.title.as_deref(), Some("Week #2"));

    let view = post_view(
        &client,
        format!("{}/api/select", server.base_url),
        serde_json::json!({ "status": "partial" }),
    )
    .await;
    assert_eq!(view.overlay.state, "closed");

    let marked = week(&view, "2025-09-15");
    assert_eq!(marked.status, "partial");
    assert_eq!(marked.week_number, 2);
    assert_eq!(marked.end_date, "2025-09-21");
    assert_eq!(view.stats.total_credit, before.total_credit + 0.5);
}

#[tokio::test]
async fn http_toggle_off_removes_record() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    post_view(
        &client,
        format!("{}/api/overlay/open", server.base_url),
        serde_json::json!({ "week_start": "2025-09-22" }),
    )
    .await;
    let view = post_view(
        &client,
        format!("{}/api/select", server.base_url),
        serde_json::json!({ "status": "nothing-done" }),
    )
    .await;
    assert_eq!(week(&view, "2025-09-22").status, "nothing-done");
    assert_eq!(view.stats.current_streak, 0);

    // Re-selecting the active status deletes the record entirely.
    post_view(
        &client,
        format!("{}/api/overlay/open", server.base_url),
        serde_json::json!({ "week_start": "2025-09-22" }),
    )
    .await;
    let view = post_view(
        &client,
        format!("{}/api/select", server.base_url),
        serde_json::json!({ "status": "nothing-done" }),
    )
    .await;
    assert_eq!(view.overlay.state, "closed");
    assert_eq!(week(&view, "2025-09-22").status, "unmarked");
}

#[tokio::test]
async fn http_bonus_flow_stores_bonus_credit() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before: StatsView = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    post_view(
        &client,
        format!("{}/api/overlay/open", server.base_url),
        serde_json::json!({ "week_start": "2025-09-29" }),
    )
    .await;
    let view = post_view(
        &client,
        format!("{}/api/select", server.base_url),
        serde_json::json!({ "status": "complete" }),
    )
    .await;
    assert_eq!(view.overlay.state, "awaiting-bonus");
    assert_eq!(view.overlay.markers, [false; 5]);
    // No store write yet: the window still shows the week unmarked.
    assert_eq!(week(&view, "2025-09-29").status, "unmarked");

    let view = post_view(
        &client,
        format!("{}/api/bonus/marker", server.base_url),
        serde_json::json!({ "value": 3 }),
    )
    .await;
    assert_eq!(view.overlay.markers, [true, true, true, false, false]);

    let view = post_view_empty(&client, format!("{}/api/bonus/confirm", server.base_url)).await;
    assert_eq!(view.overlay.state, "closed");
    assert_eq!(week(&view, "2025-09-29").status, "complete");
    assert_eq!(view.stats.total_credit, before.total_credit + 4.0);
    assert_eq!(
        view.stats.milestone_count,
        ((before.total_credit + 4.0) / 4.0).floor() as u64
    );
}

#[tokio::test]
async fn http_previous_month_stops_at_epoch() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let view = post_view(
        &client,
        format!("{}/api/navigate", server.base_url),
        serde_json::json!({ "direction": "next" }),
    )
    .await;
    assert_eq!(view.calendar.month_label, "October 2025");
    assert!(view.calendar.prev_enabled);

    let view = post_view(
        &client,
        format!("{}/api/navigate", server.base_url),
        serde_json::json!({ "direction": "prev" }),
    )
    .await;
    assert_eq!(view.calendar.month_label, "September 2025");
    assert!(!view.calendar.prev_enabled);

    // At the epoch month another "prev" is a no-op.
    let view = post_view(
        &client,
        format!("{}/api/navigate", server.base_url),
        serde_json::json!({ "direction": "prev" }),
    )
    .await;
    assert_eq!(view.calendar.month_label, "September 2025");
}

#[tokio::test]
async fn http_rejects_invalid_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/select", server.base_url))
        .json(&serde_json::json!({ "status": "unmarked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/bonus/marker", server.base_url))
        .json(&serde_json::json!({ "value": 6 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/overlay/open", server.base_url))
        .json(&serde_json::json!({ "week_start": "not-a-date" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}
