use crate::models::StatsView;

pub fn render_index(month_label: &str, stats: &StatsView) -> String {
    INDEX_HTML
        .replace("{{MONTH_YEAR}}", month_label)
        .replace("{{CREDIT}}", &format_credit(stats.total_credit))
        .replace("{{MILESTONES}}", &stats.milestone_count.to_string())
        .replace("{{STREAK}}", &stats.current_streak.to_string())
}

fn format_credit(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Weekly Habit Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f0fa;
      --bg-2: #cfd8f5;
      --ink: #2a2833;
      --accent: #7a5cff;
      --accent-2: #2f4858;
      --good: #2d7a4b;
      --mid: #c98a1b;
      --bad: #c63b2b;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e6e3f7 60%, #f4f1fb 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c6e;
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b87a0;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.streak {
      color: var(--accent);
    }

    .month-nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    .month-nav h2 {
      margin: 0;
      font-size: 1.4rem;
    }

    .month-nav button {
      min-width: 110px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease, opacity 150ms ease;
      display: inline-flex;
      align-items: center;
      justify-content: center;
      gap: 10px;
      background: var(--accent-2);
      color: white;
    }

    button:active {
      transform: scale(0.98);
    }

    button:disabled {
      opacity: 0.45;
      cursor: not-allowed;
    }

    .calendar {
      display: grid;
      gap: 12px;
    }

    .week-card {
      background: white;
      border-radius: 18px;
      padding: 16px 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      border-left: 8px solid #c9c5d8;
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    .week-card:hover {
      transform: translateY(-2px);
      box-shadow: 0 12px 28px rgba(47, 72, 88, 0.12);
    }

    .week-card h3 {
      margin: 0;
      font-size: 1.05rem;
    }

    .week-card p {
      margin: 4px 0 0;
      color: #6f6a80;
      font-size: 0.9rem;
    }

    .week-card .badge {
      font-size: 0.8rem;
      font-weight: 600;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      padding: 6px 12px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.08);
      color: #6b645d;
      white-space: nowrap;
    }

    .week-card.status-complete {
      border-left-color: var(--good);
    }

    .week-card.status-complete .badge {
      background: rgba(45, 122, 75, 0.12);
      color: var(--good);
    }

    .week-card.status-partial {
      border-left-color: var(--mid);
    }

    .week-card.status-partial .badge {
      background: rgba(201, 138, 27, 0.14);
      color: var(--mid);
    }

    .week-card.status-none {
      border-left-color: var(--accent-2);
    }

    .week-card.status-nothing-done {
      border-left-color: var(--bad);
    }

    .week-card.status-nothing-done .badge {
      background: rgba(198, 59, 43, 0.12);
      color: var(--bad);
    }

    .overlay {
      position: fixed;
      inset: 0;
      background: rgba(42, 40, 51, 0.55);
      display: none;
      place-items: center;
      padding: 18px;
      z-index: 10;
    }

    .overlay.visible {
      display: grid;
    }

    .overlay-card {
      width: min(420px, 100%);
      background: white;
      border-radius: 22px;
      padding: 28px;
      display: grid;
      gap: 18px;
      box-shadow: var(--shadow);
    }

    .overlay-card h3 {
      margin: 0;
      font-size: 1.3rem;
    }

    .status-buttons {
      display: grid;
      grid-template-columns: repeat(2, 1fr);
      gap: 10px;
    }

    .btn-status {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    .btn-status.active {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(122, 92, 255, 0.3);
    }

    .bonus {
      display: none;
      gap: 12px;
    }

    .bonus.visible {
      display: grid;
    }

    .bonus .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b87a0;
    }

    .markers {
      display: flex;
      gap: 8px;
      justify-content: center;
    }

    .marker {
      width: 44px;
      height: 44px;
      border-radius: 50%;
      border: 2px solid rgba(47, 72, 88, 0.2);
      background: white;
      color: #c9c5d8;
      font-size: 1.3rem;
      line-height: 1;
      padding: 0;
    }

    .marker.active {
      border-color: var(--accent);
      background: rgba(122, 92, 255, 0.12);
      color: var(--accent);
    }

    .btn-confirm {
      background: var(--good);
    }

    .btn-close {
      background: transparent;
      color: #6f6a80;
      box-shadow: none;
    }

    .status-line {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status-line[data-type="error"] {
      color: var(--bad);
    }

    .hint {
      margin: 0;
      color: #6f6a80;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      .month-nav button {
        min-width: 80px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Weekly Habit Tracker</h1>
      <p class="subtitle">Mark each week, collect credit, keep the streak alive.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Total credit</span>
        <span id="credit" class="value">{{CREDIT}}</span>
      </div>
      <div class="stat">
        <span class="label">Milestones</span>
        <span id="milestones" class="value">{{MILESTONES}}</span>
      </div>
      <div class="stat">
        <span class="label">Streak</span>
        <span id="streak" class="value streak">{{STREAK}}</span>
      </div>
    </section>

    <section class="month-nav">
      <button id="prev-month" type="button">&larr; Prev</button>
      <h2 id="month-label">{{MONTH_YEAR}}</h2>
      <button id="next-month" type="button">Next &rarr;</button>
    </section>

    <section class="calendar" id="calendar"></section>

    <div class="status-line" id="status-line"></div>
    <p class="hint">Click a week to mark it. A milestone is earned every 4 credits; only an explicit "nothing done" breaks a streak.</p>
  </main>

  <div class="overlay" id="overlay">
    <div class="overlay-card">
      <h3 id="overlay-title">Week</h3>
      <div class="status-buttons">
        <button class="btn-status" type="button" data-status="complete">Complete</button>
        <button class="btn-status" type="button" data-status="partial">Partial</button>
        <button class="btn-status" type="button" data-status="none">No habit due</button>
        <button class="btn-status" type="button" data-status="nothing-done">Nothing done</button>
      </div>
      <div class="bonus" id="bonus">
        <span class="label">Bonus credit</span>
        <div class="markers" id="markers"></div>
        <button class="btn-confirm" id="confirm-bonus" type="button">Confirm</button>
      </div>
      <button class="btn-close" id="close-overlay" type="button">Close</button>
    </div>
  </div>

  <script>
    const calendarEl = document.getElementById('calendar');
    const monthLabelEl = document.getElementById('month-label');
    const prevBtn = document.getElementById('prev-month');
    const nextBtn = document.getElementById('next-month');
    const creditEl = document.getElementById('credit');
    const milestonesEl = document.getElementById('milestones');
    const streakEl = document.getElementById('streak');
    const overlayEl = document.getElementById('overlay');
    const overlayTitleEl = document.getElementById('overlay-title');
    const bonusEl = document.getElementById('bonus');
    const markersEl = document.getElementById('markers');
    const confirmBtn = document.getElementById('confirm-bonus');
    const closeBtn = document.getElementById('close-overlay');
    const statusLineEl = document.getElementById('status-line');
    const statusButtons = Array.from(document.querySelectorAll('.btn-status'));

    const statusLabels = {
      'unmarked': 'Unmarked',
      'complete': 'Complete',
      'partial': 'Partial',
      'none': 'No habit due',
      'nothing-done': 'Nothing done',
      'unknown': 'Unknown'
    };

    const setStatusLine = (message, type) => {
      statusLineEl.textContent = message;
      statusLineEl.dataset.type = type || '';
    };

    const formatCredit = (value) => {
      return Number.isInteger(value) ? value.toString() : value.toFixed(1);
    };

    const api = async (path, body) => {
      const options = { method: 'POST' };
      if (body !== undefined) {
        options.headers = { 'content-type': 'application/json' };
        options.body = JSON.stringify(body);
      }
      const res = await fetch(path, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const renderCalendar = (calendar) => {
      monthLabelEl.textContent = calendar.month_label;
      prevBtn.disabled = !calendar.prev_enabled;

      calendarEl.innerHTML = '';
      calendar.weeks.forEach((week) => {
        const card = document.createElement('div');
        card.classList.add('week-card', `status-${week.status}`);

        const info = document.createElement('div');
        const title = document.createElement('h3');
        title.textContent = `Week ${week.week_number}`;
        const range = document.createElement('p');
        range.textContent = `${week.start_date} - ${week.end_date}`;
        info.appendChild(title);
        info.appendChild(range);

        const badge = document.createElement('span');
        badge.classList.add('badge');
        badge.textContent = statusLabels[week.status] || week.status;

        card.appendChild(info);
        card.appendChild(badge);
        card.addEventListener('click', () => {
          send('/api/overlay/open', { week_start: week.start_date });
        });
        calendarEl.appendChild(card);
      });
    };

    const renderStats = (stats) => {
      creditEl.textContent = formatCredit(stats.total_credit);
      milestonesEl.textContent = stats.milestone_count;
      streakEl.textContent = stats.current_streak;
    };

    const renderOverlay = (overlay) => {
      if (overlay.state === 'closed') {
        overlayEl.classList.remove('visible');
        return;
      }

      overlayEl.classList.add('visible');
      overlayTitleEl.textContent = overlay.title || 'Week';

      statusButtons.forEach((button) => {
        button.classList.toggle('active', button.dataset.status === overlay.active_status);
      });

      bonusEl.classList.toggle('visible', overlay.state === 'awaiting-bonus');
      Array.from(markersEl.children).forEach((marker, index) => {
        marker.classList.toggle('active', Boolean(overlay.markers[index]));
      });
    };

    const render = (view) => {
      renderCalendar(view.calendar);
      renderStats(view.stats);
      renderOverlay(view.overlay);
    };

    const send = (path, body) => {
      api(path, body)
        .then((view) => {
          render(view);
          setStatusLine('', '');
        })
        .catch((err) => setStatusLine(err.message, 'error'));
    };

    for (let value = 1; value <= 5; value += 1) {
      const marker = document.createElement('button');
      marker.classList.add('marker');
      marker.type = 'button';
      marker.textContent = '★';
      marker.addEventListener('click', () => {
        send('/api/bonus/marker', { value });
      });
      markersEl.appendChild(marker);
    }

    statusButtons.forEach((button) => {
      button.addEventListener('click', () => {
        send('/api/select', { status: button.dataset.status });
      });
    });

    confirmBtn.addEventListener('click', () => send('/api/bonus/confirm'));
    closeBtn.addEventListener('click', () => send('/api/overlay/close'));
    prevBtn.addEventListener('click', () => send('/api/navigate', { direction: 'prev' }));
    nextBtn.addEventListener('click', () => send('/api/navigate', { direction: 'next' }));

    fetch('/api/view')
      .then((res) => {
        if (!res.ok) {
          throw new Error('Unable to load tracker view');
        }
        return res.json();
      })
      .then(render)
      .catch((err) => setStatusLine(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_seeds_header_values() {
        let stats = StatsView {
            total_credit: 2.5,
            milestone_count: 0,
            current_streak: 3,
        };
        let page = render_index("September 2025", &stats);
        assert!(page.contains("September 2025"));
        assert!(page.contains("2.5"));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn whole_credit_renders_without_decimals() {
        assert_eq!(format_credit(4.0), "4");
        assert_eq!(format_credit(4.5), "4.5");
    }
}
