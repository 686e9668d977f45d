use crate::models::{BalanceStatus, DashboardResponse, MoodEntry};

const LOW_BALANCE: f64 = 30.0;

pub fn render_index(entries: &[MoodEntry], dashboard: &DashboardResponse, clicks: u64) -> String {
    INDEX_HTML
        .replace("{{CLICKS}}", &clicks.to_string())
        .replace("{{TOTAL}}", &dashboard.total.to_string())
        .replace("{{WEEK}}", &dashboard.week_count.to_string())
        .replace("{{LAST}}", &escape_html(&dashboard.last_active))
        .replace("{{BALANCE}}", &format!("{:.0}", dashboard.balance.balance_pct))
        .replace("{{BAR}}", bar_background(dashboard.balance.balance_pct))
        .replace("{{STATUS}}", status_label(dashboard.balance.status))
        .replace("{{TIMELINE}}", &render_timeline(entries))
}

fn bar_background(balance_pct: f64) -> &'static str {
    if balance_pct < LOW_BALANCE {
        "#ef4444"
    } else {
        "linear-gradient(90deg, #10b981, #34d399)"
    }
}

fn status_label(status: BalanceStatus) -> &'static str {
    match status {
        BalanceStatus::Positive => "Full of Energy!",
        BalanceStatus::Negative => "Need a Break...",
        BalanceStatus::Neutral => "Calm & Neutral",
    }
}

fn render_timeline(entries: &[MoodEntry]) -> String {
    if entries.is_empty() {
        return r#"<li class="empty">No moods yet.</li>"#.to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                r#"<li class="timeline-item">
        <form method="post" action="/mood/{index}/delete"><button class="delete" type="submit">&times;</button></form>
        <span class="date">{date}</span>
        <p>{text}</p>
      </li>"#,
                date = escape_html(&entry.date),
                text = escape_html(&entry.text),
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ")
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Notepad</title>
  <style>
    :root {
      --main-bg: linear-gradient(-45deg, #ee7752, #e73c7e, #23a6d5, #23d5ab);
      --accent: #0288d1;
      --card: rgba(255, 255, 255, 0.9);
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--main-bg);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 16px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 24px;
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
      text-align: center;
    }

    .bar {
      height: 10px;
      border-radius: 5px;
      background: #e5e7eb;
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
    }

    button {
      background: var(--accent);
      color: #fff;
      border: none;
      border-radius: 10px;
      padding: 8px 14px;
      cursor: pointer;
    }

    .timeline {
      list-style: none;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    .timeline-item {
      position: relative;
      padding: 12px 16px;
      border-left: 3px solid var(--accent);
      background: #fff;
      border-radius: 8px;
    }

    .timeline-item form {
      position: absolute;
      top: 8px;
      right: 8px;
    }

    .date {
      font-size: 0.8rem;
      color: #6b7280;
    }
  </style>
</head>
<body>
  <main class="app">
    <section>
      <form method="post" action="/click">
        <button type="submit">Click to Learn More</button>
      </form>
      <p>Click Count: {{CLICKS}}</p>
    </section>

    <section class="stats">
      <div><strong>{{TOTAL}}</strong><br />Total Records</div>
      <div><strong>{{WEEK}}</strong><br />This Week</div>
      <div><strong>{{LAST}}</strong><br />Last Active</div>
    </section>

    <section>
      <h2>Mood Balance</h2>
      <div class="bar"><span style="width: {{BALANCE}}%; background: {{BAR}}"></span></div>
      <p>{{STATUS}}</p>
    </section>

    <section>
      <h2>Mood Notepad</h2>
      <form method="post" action="/mood">
        <input name="text" placeholder="Write down your mood..." />
        <button type="submit">Record</button>
      </form>
      <form method="post" action="/mood/clear" onsubmit="return confirm('Are you sure you want to delete all mood records?');">
        <input type="hidden" name="confirm" value="yes" />
        <button type="submit">Clear All</button>
      </form>
      <a href="/api/moods/export">Export Diary</a>
      <ul class="timeline">
      {{TIMELINE}}
      </ul>
    </section>
  </main>
</body>
</html>
"#;
