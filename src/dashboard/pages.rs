//! Embedded single-file pages (HTML + CSS + JS).
//!
//! Each page is self-contained and talks to the JSON API with `fetch`;
//! charts are drawn on raw canvas. No template engine, no bundler.

/// Landing page: pick a league.
pub const HOME_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Boxseat</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --green: #00c896;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; min-height: 100vh; }
  .container { max-width: 860px; margin: 0 auto; padding: 60px 20px; text-align: center; }
  h1 { font-size: 2.6rem; letter-spacing: .04em; margin-bottom: .4rem; }
  .subtitle { color: var(--muted); margin-bottom: 2.5rem; }
  .cards { display: flex; gap: 1.5rem; justify-content: center; flex-wrap: wrap; }
  .card { background: var(--card); border: 1px solid var(--border); border-radius: 14px; padding: 2rem 2.4rem; min-width: 260px; text-align: left; }
  .card h2 { font-size: 1.6rem; margin-bottom: .5rem; }
  .card p { color: var(--muted); font-size: .9rem; margin-bottom: 1.2rem; }
  .tag { display: inline-flex; align-items: center; gap: 6px; font-size: .7rem; padding: 4px 10px; border-radius: 999px; text-transform: uppercase; letter-spacing: 1px; background: rgba(255,255,255,0.08); margin-bottom: .8rem; }
  .dot { width: 8px; height: 8px; border-radius: 999px; background: var(--green); }
  .btn { display: inline-block; padding: .6rem 1.3rem; border-radius: 999px; background: var(--accent); color: white; text-decoration: none; font-size: .9rem; font-weight: 600; }
  .btn:hover { filter: brightness(1.1); }
</style>
</head>
<body>
<div class="container">
  <h1>⚾ Boxseat 🏀</h1>
  <p class="subtitle">Schedules, recent form, head-to-head history, and a heuristic win probability.</p>
  <div class="cards">
    <div class="card">
      <div class="tag"><span class="dot"></span> MLB Stats API</div>
      <h2>MLB</h2>
      <p>Slates by date, linescores, and run trends for all 30 clubs.</p>
      <a class="btn" href="/mlb">Open MLB</a>
    </div>
    <div class="card">
      <div class="tag"><span class="dot"></span> BallDontLie</div>
      <h2>NBA</h2>
      <p>Games by date, starting fives, and scoring trends for every team.</p>
      <a class="btn" href="/nba">Open NBA</a>
    </div>
  </div>
</div>
</body>
</html>"#;

/// MLB index: team picker, window controls, schedule table.
pub const MLB_INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Boxseat · MLB</title>
<style>
  :root {
    --bg: #0f1117; --card: #1a1d27; --border: #2a2d3a;
    --accent: #6c63ff; --green: #00c896; --red: #ff4f6a;
    --text: #e0e0e0; --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { display: flex; align-items: center; gap: 1rem; padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  header a { color: var(--muted); text-decoration: none; font-size: .85rem; }
  header a:hover { color: var(--accent); }
  main { padding: 1.5rem 2rem; display: grid; gap: 1.5rem; max-width: 1100px; margin: 0 auto; }
  .controls { display: flex; gap: .8rem; flex-wrap: wrap; align-items: center; }
  select, input, button { background: var(--card); color: var(--text); border: 1px solid var(--border); border-radius: 8px; padding: .5rem .8rem; font-size: .9rem; }
  input { width: 5rem; }
  button { background: var(--accent); border: none; cursor: pointer; font-weight: 600; }
  button:hover { filter: brightness(1.1); }
  .window { color: var(--muted); font-size: .85rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; overflow: hidden; }
  .panel-header { padding: .9rem 1.2rem; border-bottom: 1px solid var(--border); font-weight: 600; }
  table { width: 100%; border-collapse: collapse; }
  th { padding: .7rem 1rem; text-align: left; font-size: .75rem; text-transform: uppercase; color: var(--muted); border-bottom: 1px solid var(--border); }
  td { padding: .65rem 1rem; font-size: .88rem; border-bottom: 1px solid #1e2130; }
  tr:last-child td { border-bottom: none; }
  td a { color: var(--accent); text-decoration: none; }
  .empty { color: var(--muted); text-align: center; padding: 2rem; font-size: .9rem; }
</style>
</head>
<body>
<header>
  <h1>⚾ MLB Schedule</h1>
  <span style="margin-left:auto"></span>
  <a href="/">← leagues</a>
</header>
<main>
  <div class="controls">
    <select id="team"><option value="">ALL TEAMS</option></select>
    <input id="days" type="number" min="1" max="60" value="7">
    <select id="mode">
      <option value="future">Upcoming</option>
      <option value="past">Results</option>
    </select>
    <button onclick="loadSchedule()">Load</button>
    <span class="window" id="window"></span>
  </div>
  <div class="panel">
    <div class="panel-header" id="panel-title">Games</div>
    <table>
      <thead><tr><th>Date</th><th>Time</th><th>Away</th><th>Home</th><th>Venue</th><th>Status</th><th>Score</th></tr></thead>
      <tbody id="rows"><tr><td colspan="7" class="empty">Loading…</td></tr></tbody>
    </table>
  </div>
</main>
<script>
async function loadTeams() {
  const r = await fetch('/api/teams');
  if (!r.ok) return;
  const teams = await r.json();
  const sel = document.getElementById('team');
  for (const t of teams) {
    const o = document.createElement('option');
    o.value = t.id;
    o.textContent = `${t.name} (${t.abbr})`;
    sel.appendChild(o);
  }
}

async function loadSchedule() {
  const teamId = document.getElementById('team').value;
  const days = document.getElementById('days').value || 7;
  const mode = document.getElementById('mode').value;
  const params = new URLSearchParams({ days, mode });
  if (teamId) params.set('teamId', teamId);

  const r = await fetch('/api/schedule?' + params);
  if (!r.ok) return;
  const data = await r.json();

  document.getElementById('window').textContent = data.window;
  document.getElementById('panel-title').textContent = `Games · ${data.team}`;

  const tbody = document.getElementById('rows');
  if (!data.rows.length) {
    tbody.innerHTML = '<tr><td colspan="7" class="empty">No games in this window.</td></tr>';
    return;
  }
  tbody.innerHTML = data.rows.map(g => {
    const score = g.home_score != null && g.away_score != null
      ? `${g.away_score}–${g.home_score}` : '–';
    return `<tr>
      <td>${g.date}</td>
      <td>${g.time}</td>
      <td>${g.away}</td>
      <td>${g.home}</td>
      <td>${g.venue}</td>
      <td><a href="/game/${g.game_id}">${g.status}</a></td>
      <td>${score}</td>
    </tr>`;
  }).join('');
}

loadTeams().then(loadSchedule);
</script>
</body>
</html>"#;

/// NBA index: same layout as MLB, against the NBA endpoints.
pub const NBA_INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Boxseat · NBA</title>
<style>
  :root {
    --bg: #0f1117; --card: #1a1d27; --border: #2a2d3a;
    --accent: #6c63ff; --green: #00c896; --red: #ff4f6a;
    --text: #e0e0e0; --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { display: flex; align-items: center; gap: 1rem; padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  header a { color: var(--muted); text-decoration: none; font-size: .85rem; }
  header a:hover { color: var(--accent); }
  main { padding: 1.5rem 2rem; display: grid; gap: 1.5rem; max-width: 1100px; margin: 0 auto; }
  .controls { display: flex; gap: .8rem; flex-wrap: wrap; align-items: center; }
  select, input, button { background: var(--card); color: var(--text); border: 1px solid var(--border); border-radius: 8px; padding: .5rem .8rem; font-size: .9rem; }
  input { width: 5rem; }
  button { background: var(--accent); border: none; cursor: pointer; font-weight: 600; }
  button:hover { filter: brightness(1.1); }
  .window { color: var(--muted); font-size: .85rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; overflow: hidden; }
  .panel-header { padding: .9rem 1.2rem; border-bottom: 1px solid var(--border); font-weight: 600; }
  table { width: 100%; border-collapse: collapse; }
  th { padding: .7rem 1rem; text-align: left; font-size: .75rem; text-transform: uppercase; color: var(--muted); border-bottom: 1px solid var(--border); }
  td { padding: .65rem 1rem; font-size: .88rem; border-bottom: 1px solid #1e2130; }
  tr:last-child td { border-bottom: none; }
  td a { color: var(--accent); text-decoration: none; }
  .empty { color: var(--muted); text-align: center; padding: 2rem; font-size: .9rem; }
</style>
</head>
<body>
<header>
  <h1>🏀 NBA Schedule</h1>
  <span style="margin-left:auto"></span>
  <a href="/">← leagues</a>
</header>
<main>
  <div class="controls">
    <select id="team"><option value="">ALL TEAMS</option></select>
    <input id="days" type="number" min="1" max="7" value="7">
    <select id="mode">
      <option value="future">Upcoming</option>
      <option value="past">Results</option>
    </select>
    <button onclick="loadSchedule()">Load</button>
    <span class="window" id="window"></span>
  </div>
  <div class="panel">
    <div class="panel-header" id="panel-title">Games</div>
    <table>
      <thead><tr><th>Date</th><th>Time</th><th>Away</th><th>Home</th><th>Venue</th><th>Status</th><th>Score</th></tr></thead>
      <tbody id="rows"><tr><td colspan="7" class="empty">Loading…</td></tr></tbody>
    </table>
  </div>
</main>
<script>
async function loadTeams() {
  const r = await fetch('/nba/api/teams');
  if (!r.ok) return;
  const teams = await r.json();
  const sel = document.getElementById('team');
  for (const t of teams) {
    const o = document.createElement('option');
    o.value = t.id;
    o.textContent = `${t.name} (${t.abbr})`;
    sel.appendChild(o);
  }
}

async function loadSchedule() {
  const teamId = document.getElementById('team').value;
  const days = document.getElementById('days').value || 7;
  const mode = document.getElementById('mode').value;
  const params = new URLSearchParams({ days, mode });
  if (teamId) params.set('teamId', teamId);

  const r = await fetch('/nba/api/schedule?' + params);
  if (!r.ok) return;
  const data = await r.json();

  document.getElementById('window').textContent = data.window;
  document.getElementById('panel-title').textContent = `Games · ${data.team}`;

  const tbody = document.getElementById('rows');
  if (!data.rows.length) {
    tbody.innerHTML = '<tr><td colspan="7" class="empty">No games in this window.</td></tr>';
    return;
  }
  tbody.innerHTML = data.rows.map(g => {
    const score = g.home_score != null && g.away_score != null
      ? `${g.away_score}–${g.home_score}` : '–';
    return `<tr>
      <td>${g.date}</td>
      <td>${g.time}</td>
      <td>${g.away}</td>
      <td>${g.home}</td>
      <td>${g.venue}</td>
      <td><a href="/nba/game/${g.game_id}">${g.status}</a></td>
      <td>${score}</td>
    </tr>`;
  }).join('');
}

loadTeams().then(loadSchedule);
</script>
</body>
</html>"#;

/// MLB game page: linescore, R/H/E, win probability, trends, head-to-head.
pub const MLB_GAME_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Boxseat · MLB Game</title>
<style>
  :root {
    --bg: #0f1117; --card: #1a1d27; --border: #2a2d3a;
    --accent: #6c63ff; --green: #00c896; --red: #ff4f6a;
    --text: #e0e0e0; --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { padding: 1rem 2rem; border-bottom: 1px solid var(--border); display: flex; align-items: baseline; gap: 1rem; flex-wrap: wrap; }
  header h1 { font-size: 1.3rem; }
  header .sub { color: var(--muted); font-size: .85rem; }
  header a { color: var(--muted); text-decoration: none; font-size: .85rem; margin-left: auto; }
  header a:hover { color: var(--accent); }
  main { padding: 1.5rem 2rem; display: grid; gap: 1.5rem; max-width: 1100px; margin: 0 auto; }
  .meta { color: var(--muted); font-size: .88rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; overflow: hidden; }
  .panel-header { padding: .9rem 1.2rem; border-bottom: 1px solid var(--border); font-weight: 600; }
  .panel-body { padding: 1rem 1.2rem; }
  table { width: 100%; border-collapse: collapse; }
  th { padding: .6rem .9rem; text-align: center; font-size: .75rem; text-transform: uppercase; color: var(--muted); border-bottom: 1px solid var(--border); }
  td { padding: .55rem .9rem; font-size: .88rem; border-bottom: 1px solid #1e2130; text-align: center; }
  td:first-child, th:first-child { text-align: left; }
  tr:last-child td { border-bottom: none; }
  .wp-bar { display: flex; height: 26px; border-radius: 8px; overflow: hidden; font-size: .78rem; font-weight: 700; }
  .wp-home { background: var(--accent); display: flex; align-items: center; padding-left: .6rem; }
  .wp-away { background: var(--red); display: flex; align-items: center; justify-content: flex-end; padding-right: .6rem; }
  .wp-note { color: var(--muted); font-size: .8rem; margin-top: .6rem; }
  .wp-pick { margin-top: .4rem; font-size: .9rem; }
  #trend-chart { width: 100%; }
  .empty { color: var(--muted); text-align: center; padding: 1.5rem; font-size: .9rem; }
  .two-col { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
  @media (max-width: 768px) { .two-col { grid-template-columns: 1fr; } }
</style>
</head>
<body>
<header>
  <h1 id="title">Loading…</h1>
  <span class="sub" id="subtitle"></span>
  <a href="/mlb">← schedule</a>
</header>
<main>
  <div class="meta" id="meta"></div>

  <div class="panel">
    <div class="panel-header">Linescore</div>
    <table>
      <thead><tr id="line-head"></tr></thead>
      <tbody id="line-body"><tr><td class="empty">Loading…</td></tr></tbody>
    </table>
  </div>

  <div class="panel">
    <div class="panel-header">Win Probability</div>
    <div class="panel-body">
      <div class="wp-bar">
        <div class="wp-home" id="wp-home"></div>
        <div class="wp-away" id="wp-away"></div>
      </div>
      <div class="wp-pick" id="wp-pick"></div>
      <div class="wp-note" id="wp-note"></div>
    </div>
  </div>

  <div class="panel">
    <div class="panel-header">Recent Scoring Trends (last 5 games)</div>
    <div class="panel-body">
      <canvas id="trend-chart" height="220"></canvas>
      <div class="wp-note" id="trend-note"></div>
    </div>
  </div>

  <div class="panel">
    <div class="panel-header" id="h2h-title">Head-to-Head</div>
    <table>
      <thead><tr><th>Date</th><th id="h2h-a">A</th><th id="h2h-b">B</th></tr></thead>
      <tbody id="h2h-body"><tr><td colspan="3" class="empty">Loading…</td></tr></tbody>
    </table>
  </div>
</main>
<script>
const gameId = location.pathname.split('/').pop();

function drawLines(canvas, labels, series) {
  const ctx = canvas.getContext('2d');
  const W = canvas.parentElement.clientWidth - 32;
  const H = canvas.height;
  canvas.width = W;

  const all = series.flatMap(s => s.values);
  if (all.length < 2) return;
  const min = Math.min(...all) - 1;
  const max = Math.max(...all) + 1;
  const range = max - min || 1;
  const left = 26, bottom = 18;
  const plotW = W - left, plotH = H - bottom;

  ctx.clearRect(0, 0, W, H);
  ctx.strokeStyle = '#2a2d3a';
  ctx.lineWidth = 1;
  for (let i = 0; i <= 4; i++) {
    const y = plotH - (i / 4) * plotH;
    ctx.beginPath(); ctx.moveTo(left, y); ctx.lineTo(W, y); ctx.stroke();
    ctx.fillStyle = '#8888aa'; ctx.font = '10px sans-serif';
    ctx.fillText(Math.round(min + (i / 4) * range), 0, y + 3);
  }
  labels.forEach((lab, i) => {
    const x = left + (i / Math.max(labels.length - 1, 1)) * plotW;
    ctx.fillText(lab, x - 12, H - 4);
  });

  for (const s of series) {
    const step = plotW / Math.max(s.values.length - 1, 1);
    const toY = v => plotH - ((v - min) / range) * plotH;
    ctx.strokeStyle = s.color;
    ctx.lineWidth = 2;
    ctx.beginPath();
    s.values.forEach((v, i) =>
      i === 0 ? ctx.moveTo(left, toY(v)) : ctx.lineTo(left + i * step, toY(v)));
    ctx.stroke();
  }
}

async function load() {
  const r = await fetch('/api/game/' + gameId);
  if (!r.ok) {
    document.getElementById('title').textContent = 'Game not found';
    return;
  }
  const g = await r.json();

  document.getElementById('title').textContent = g.title;
  document.getElementById('subtitle').textContent = g.subtitle;
  document.getElementById('meta').textContent =
    [g.status, g.when, g.venue].filter(Boolean).join(' · ');

  // Linescore
  const head = ['', ...g.innings, 'R', 'H', 'E'];
  document.getElementById('line-head').innerHTML =
    head.map(h => `<th>${h}</th>`).join('');
  const cell = v => v == null ? '-' : v;
  const rows = [
    [g.away_name, ...g.away_innings.map(cell), g.away_runs, g.away_hits, g.away_errors],
    [g.home_name, ...g.home_innings.map(cell), g.home_runs, g.home_hits, g.home_errors],
  ];
  document.getElementById('line-body').innerHTML = g.innings.length
    ? rows.map(r2 => `<tr>${r2.map(c => `<td>${c}</td>`).join('')}</tr>`).join('')
    : `<tr><td colspan="${head.length}" class="empty">No linescore yet.</td></tr>`;

  // Win probability
  const home = document.getElementById('wp-home');
  const away = document.getElementById('wp-away');
  home.style.width = g.wp.home_pct + '%';
  away.style.width = g.wp.away_pct + '%';
  home.textContent = `${g.home_name} ${g.wp.home_pct}%`;
  away.textContent = `${g.wp.away_pct}% ${g.away_name}`;
  document.getElementById('wp-pick').textContent = 'Pick: ' + g.wp.pick;
  document.getElementById('wp-note').textContent = g.wp.note;

  // Trends
  const labels = g.trend_home.labels.length ? g.trend_home.labels : g.trend_away.labels;
  if (labels.length) {
    drawLines(document.getElementById('trend-chart'), labels, [
      { name: 'home for', color: '#6c63ff', values: g.trend_home.pts_for },
      { name: 'home against', color: '#3a3566', values: g.trend_home.pts_against },
      { name: 'away for', color: '#ff4f6a', values: g.trend_away.pts_for },
      { name: 'away against', color: '#7a3340', values: g.trend_away.pts_against },
    ]);
    document.getElementById('trend-note').textContent =
      `${g.home_name} avg ${g.trend_home.avg_for.toFixed(1)} for / ${g.trend_home.avg_against.toFixed(1)} against · ` +
      `${g.away_name} avg ${g.trend_away.avg_for.toFixed(1)} for / ${g.trend_away.avg_against.toFixed(1)} against`;
  } else {
    document.getElementById('trend-note').textContent = 'No recent completed games found.';
  }

  // Head-to-head
  document.getElementById('h2h-a').textContent = g.h2h.team_a;
  document.getElementById('h2h-b').textContent = g.h2h.team_b;
  const body = document.getElementById('h2h-body');
  if (g.h2h.games.length) {
    document.getElementById('h2h-title').textContent =
      `Head-to-Head · last ${g.h2h.games.length} meetings: ${g.h2h.team_a} ${g.h2h.team_a_wins} – ${g.h2h.team_b} ${g.h2h.team_b_wins}`;
    body.innerHTML = g.h2h.games.map(m => `<tr>
      <td>${m.date}</td><td>${m.team_a_pts}</td><td>${m.team_b_pts}</td>
    </tr>`).join('');
  } else {
    body.innerHTML = '<tr><td colspan="3" class="empty">No recent head-to-head games found.</td></tr>';
  }
}

load();
</script>
</body>
</html>"#;

/// NBA game page: score, starting fives, win probability, trends, head-to-head.
pub const NBA_GAME_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Boxseat · NBA Game</title>
<style>
  :root {
    --bg: #0f1117; --card: #1a1d27; --border: #2a2d3a;
    --accent: #6c63ff; --green: #00c896; --red: #ff4f6a;
    --text: #e0e0e0; --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { padding: 1rem 2rem; border-bottom: 1px solid var(--border); display: flex; align-items: baseline; gap: 1rem; flex-wrap: wrap; }
  header h1 { font-size: 1.3rem; }
  header .sub { color: var(--muted); font-size: .85rem; }
  header a { color: var(--muted); text-decoration: none; font-size: .85rem; margin-left: auto; }
  header a:hover { color: var(--accent); }
  main { padding: 1.5rem 2rem; display: grid; gap: 1.5rem; max-width: 1100px; margin: 0 auto; }
  .scoreline { display: flex; gap: 1.5rem; align-items: center; font-size: 1.2rem; }
  .scoreline .pts { font-size: 2rem; font-weight: 700; }
  .meta { color: var(--muted); font-size: .88rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; overflow: hidden; }
  .panel-header { padding: .9rem 1.2rem; border-bottom: 1px solid var(--border); font-weight: 600; }
  .panel-body { padding: 1rem 1.2rem; }
  table { width: 100%; border-collapse: collapse; }
  th { padding: .6rem .9rem; text-align: left; font-size: .75rem; text-transform: uppercase; color: var(--muted); border-bottom: 1px solid var(--border); }
  td { padding: .55rem .9rem; font-size: .88rem; border-bottom: 1px solid #1e2130; }
  tr:last-child td { border-bottom: none; }
  .wp-bar { display: flex; height: 26px; border-radius: 8px; overflow: hidden; font-size: .78rem; font-weight: 700; }
  .wp-home { background: var(--accent); display: flex; align-items: center; padding-left: .6rem; }
  .wp-away { background: var(--red); display: flex; align-items: center; justify-content: flex-end; padding-right: .6rem; }
  .wp-note { color: var(--muted); font-size: .8rem; margin-top: .6rem; }
  .wp-pick { margin-top: .4rem; font-size: .9rem; }
  #trend-chart { width: 100%; }
  .empty { color: var(--muted); text-align: center; padding: 1.5rem; font-size: .9rem; }
  .two-col { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
  @media (max-width: 768px) { .two-col { grid-template-columns: 1fr; } }
</style>
</head>
<body>
<header>
  <h1 id="title">Loading…</h1>
  <span class="sub" id="subtitle"></span>
  <a href="/nba">← schedule</a>
</header>
<main>
  <div class="scoreline">
    <span id="away-label"></span><span class="pts" id="away-pts"></span>
    <span class="meta">@</span>
    <span class="pts" id="home-pts"></span><span id="home-label"></span>
  </div>
  <div class="meta" id="meta"></div>

  <div class="panel">
    <div class="panel-header">Win Probability</div>
    <div class="panel-body">
      <div class="wp-bar">
        <div class="wp-home" id="wp-home"></div>
        <div class="wp-away" id="wp-away"></div>
      </div>
      <div class="wp-pick" id="wp-pick"></div>
      <div class="wp-note" id="wp-note"></div>
    </div>
  </div>

  <div class="two-col">
    <div class="panel">
      <div class="panel-header" id="starters-home-title">Starting Five</div>
      <table>
        <thead><tr><th>Player</th><th>Pos</th><th>PTS</th><th>REB</th><th>AST</th></tr></thead>
        <tbody id="starters-home"><tr><td colspan="5" class="empty">Loading…</td></tr></tbody>
      </table>
    </div>
    <div class="panel">
      <div class="panel-header" id="starters-away-title">Starting Five</div>
      <table>
        <thead><tr><th>Player</th><th>Pos</th><th>PTS</th><th>REB</th><th>AST</th></tr></thead>
      <tbody id="starters-away"><tr><td colspan="5" class="empty">Loading…</td></tr></tbody>
      </table>
    </div>
  </div>

  <div class="panel">
    <div class="panel-header">Recent Scoring Trends (last 5 games)</div>
    <div class="panel-body">
      <canvas id="trend-chart" height="220"></canvas>
      <div class="wp-note" id="trend-note"></div>
    </div>
  </div>

  <div class="panel">
    <div class="panel-header" id="h2h-title">Head-to-Head</div>
    <table>
      <thead><tr><th>Date</th><th id="h2h-a">A</th><th id="h2h-b">B</th><th>Margin</th></tr></thead>
      <tbody id="h2h-body"><tr><td colspan="4" class="empty">Loading…</td></tr></tbody>
    </table>
  </div>
</main>
<script>
const gameId = location.pathname.split('/').pop();

function drawLines(canvas, labels, series) {
  const ctx = canvas.getContext('2d');
  const W = canvas.parentElement.clientWidth - 32;
  const H = canvas.height;
  canvas.width = W;

  const all = series.flatMap(s => s.values);
  if (all.length < 2) return;
  const min = Math.min(...all) - 2;
  const max = Math.max(...all) + 2;
  const range = max - min || 1;
  const left = 30, bottom = 18;
  const plotW = W - left, plotH = H - bottom;

  ctx.clearRect(0, 0, W, H);
  ctx.strokeStyle = '#2a2d3a';
  ctx.lineWidth = 1;
  for (let i = 0; i <= 4; i++) {
    const y = plotH - (i / 4) * plotH;
    ctx.beginPath(); ctx.moveTo(left, y); ctx.lineTo(W, y); ctx.stroke();
    ctx.fillStyle = '#8888aa'; ctx.font = '10px sans-serif';
    ctx.fillText(Math.round(min + (i / 4) * range), 0, y + 3);
  }
  labels.forEach((lab, i) => {
    const x = left + (i / Math.max(labels.length - 1, 1)) * plotW;
    ctx.fillText(lab, x - 12, H - 4);
  });

  for (const s of series) {
    const step = plotW / Math.max(s.values.length - 1, 1);
    const toY = v => plotH - ((v - min) / range) * plotH;
    ctx.strokeStyle = s.color;
    ctx.lineWidth = 2;
    ctx.beginPath();
    s.values.forEach((v, i) =>
      i === 0 ? ctx.moveTo(left, toY(v)) : ctx.lineTo(left + i * step, toY(v)));
    ctx.stroke();
  }
}

function renderStarters(tbodyId, players) {
  const tbody = document.getElementById(tbodyId);
  if (!players.length) {
    tbody.innerHTML = '<tr><td colspan="5" class="empty">No box score yet.</td></tr>';
    return;
  }
  tbody.innerHTML = players.map(p => `<tr>
    <td>${p.name}</td><td>${p.pos}</td><td>${p.pts}</td><td>${p.reb}</td><td>${p.ast}</td>
  </tr>`).join('');
}

async function load() {
  const r = await fetch('/nba/api/game/' + gameId);
  if (!r.ok) {
    document.getElementById('title').textContent = 'Game not found';
    return;
  }
  const g = await r.json();

  document.getElementById('title').textContent = g.title;
  document.getElementById('subtitle').textContent = g.subtitle;
  document.getElementById('meta').textContent =
    [g.status, g.when, g.venue].filter(Boolean).join(' · ');

  document.getElementById('away-label').textContent = g.away_abbr || g.away_name;
  document.getElementById('home-label').textContent = g.home_abbr || g.home_name;
  document.getElementById('away-pts').textContent = g.away_score;
  document.getElementById('home-pts').textContent = g.home_score;

  // Win probability
  const home = document.getElementById('wp-home');
  const away = document.getElementById('wp-away');
  home.style.width = g.wp.home_pct + '%';
  away.style.width = g.wp.away_pct + '%';
  home.textContent = `${g.home_abbr} ${g.wp.home_pct}%`;
  away.textContent = `${g.wp.away_pct}% ${g.away_abbr}`;
  document.getElementById('wp-pick').textContent = 'Pick: ' + g.wp.pick;
  document.getElementById('wp-note').textContent = g.wp.note;

  // Starting fives
  document.getElementById('starters-home-title').textContent =
    `Starting Five · ${g.home_abbr || g.home_name}`;
  document.getElementById('starters-away-title').textContent =
    `Starting Five · ${g.away_abbr || g.away_name}`;
  renderStarters('starters-home', g.starters_home);
  renderStarters('starters-away', g.starters_away);

  // Trends
  const labels = g.trend_home.labels.length ? g.trend_home.labels : g.trend_away.labels;
  if (labels.length) {
    drawLines(document.getElementById('trend-chart'), labels, [
      { name: 'home', color: '#6c63ff', values: g.trend_home.pts_for },
      { name: 'away', color: '#ff4f6a', values: g.trend_away.pts_for },
    ]);
    document.getElementById('trend-note').textContent =
      `${g.home_abbr} avg ${g.trend_home.avg_for.toFixed(1)} for / ${g.trend_home.avg_against.toFixed(1)} against · ` +
      `${g.away_abbr} avg ${g.trend_away.avg_for.toFixed(1)} for / ${g.trend_away.avg_against.toFixed(1)} against`;
  } else {
    document.getElementById('trend-note').textContent = 'No recent completed games found.';
  }

  // Head-to-head
  document.getElementById('h2h-a').textContent = g.h2h.team_a;
  document.getElementById('h2h-b').textContent = g.h2h.team_b;
  const body = document.getElementById('h2h-body');
  if (g.h2h.games.length) {
    document.getElementById('h2h-title').textContent =
      `Head-to-Head · last ${g.h2h.games.length} meetings: ${g.h2h.team_a} ${g.h2h.team_a_wins} – ${g.h2h.team_b} ${g.h2h.team_b_wins}`;
    body.innerHTML = g.h2h.games.map(m => `<tr>
      <td>${m.date}</td><td>${m.team_a_pts}</td><td>${m.team_b_pts}</td>
      <td>${m.team_a_pts - m.team_b_pts > 0 ? '+' : ''}${m.team_a_pts - m.team_b_pts}</td>
    </tr>`).join('');
  } else {
    body.innerHTML = '<tr><td colspan="4" class="empty">No recent head-to-head games found.</td></tr>';
  }
}

load();
</script>
</body>
</html>"#;
