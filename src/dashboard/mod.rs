use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::domain::teams::{TEAMS, VENUES};
use crate::domain::RawSubmission;
use crate::engine::Orchestrator;
use crate::error::ValidationError;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

/// Build the Axum router for the form page and submission API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/domains", get(domains_handler))
        .route("/api/submit", post(submit_handler))
        .route("/api/result", get(result_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

#[derive(Serialize)]
struct Domains {
    teams: &'static [&'static str],
    venues: &'static [&'static str],
}

/// Serve the form page.
async fn index_handler() -> impl IntoResponse {
    Html(FORM_HTML)
}

/// GET /api/domains
async fn domains_handler() -> impl IntoResponse {
    Json(Domains {
        teams: &TEAMS,
        venues: &VENUES,
    })
}

/// POST /api/submit
///
/// Every submission answers 200 with a rendered result, including pipeline
/// errors and bodies that are not a readable submission.
async fn submit_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RawSubmission>, JsonRejection>,
) -> impl IntoResponse {
    let submission = match payload {
        Ok(Json(raw)) => state.orchestrator.submit_and_render(&raw).await,
        Err(rejection) => {
            state
                .orchestrator
                .reject_and_render(ValidationError::Malformed(rejection.body_text()).into())
                .await
        }
    };
    if !submission.applied {
        debug!("Submission #{} finished after a newer one", submission.rendered.ticket);
    }
    Json(submission.rendered)
}

/// GET /api/result
async fn result_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.orchestrator.slot().current().await {
        Some(rendered) => Json(rendered).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Embedded single-file form page (HTML + CSS + JS)
const FORM_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>IPL Win Predictor</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --green: #00c896;
    --red: #ff4f6a;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; display: flex; justify-content: center; padding: 2rem; }
  .card { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.5rem 2rem; width: 100%; max-width: 520px; }
  h1 { font-size: 1.4rem; margin-bottom: 1rem; }
  label { display: block; color: var(--muted); font-size: .8rem; text-transform: uppercase; letter-spacing: .06em; margin: .8rem 0 .3rem; }
  select, input { width: 100%; padding: .5rem; background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 6px; }
  button { margin-top: 1.2rem; width: 100%; padding: .7rem; background: var(--accent); color: #fff; border: none; border-radius: 6px; font-weight: 700; cursor: pointer; }
  #result { margin-top: 1.2rem; }
  .error { color: var(--red); }
  .won { color: var(--green); font-weight: 600; }
  .team { margin-top: .8rem; }
  .bar { height: 10px; background: var(--border); border-radius: 5px; overflow: hidden; margin: .3rem 0; }
  .fill { height: 100%; background: var(--green); }
  .muted { color: var(--muted); font-size: .8rem; margin-top: .8rem; }
</style>
</head>
<body>
<div class="card">
  <h1>IPL Win Predictor</h1>
  <form id="form">
    <label for="batting_team">Batting Team</label>
    <select id="batting_team" name="batting_team" required><option value="">Select Batting Team</option></select>
    <label for="bowling_team">Bowling Team</label>
    <select id="bowling_team" name="bowling_team" required><option value="">Select Bowling Team</option></select>
    <label for="city">City</label>
    <select id="city" name="city" required><option value="">Select City</option></select>
    <label for="target">Target Score</label>
    <input id="target" name="target" type="number" min="1" required>
    <label for="score">Current Score</label>
    <input id="score" name="score" type="number" min="0" required>
    <label for="overCompleted">Overs Completed</label>
    <input id="overCompleted" name="overCompleted" type="number" min="0" max="20" step="0.1" required>
    <label for="wickets">Wickets Lost</label>
    <input id="wickets" name="wickets" type="number" min="0" max="10" required>
    <button type="submit">Predict Win Probability</button>
  </form>
  <div id="result"></div>
</div>
<script>
const esc = s => String(s).replace(/[&<>"]/g, c => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;'}[c]));
let latest = 0;

async function loadDomains() {
  const d = await (await fetch('/api/domains')).json();
  const fill = (id, items) => {
    const el = document.getElementById(id);
    items.forEach(v => { const o = document.createElement('option'); o.value = v; o.textContent = v; el.appendChild(o); });
  };
  fill('batting_team', d.teams);
  fill('bowling_team', d.teams);
  fill('city', d.venues);
}

function show(r) {
  const el = document.getElementById('result');
  if (r.kind === 'error') {
    el.innerHTML = `<div class="error">${esc(r.message)}</div>`;
  } else if (r.kind === 'decided') {
    el.innerHTML = `<div class="won">${esc(r.message)}</div>`;
  } else {
    const s = r.situation;
    el.innerHTML = `<h2>Match Prediction</h2>
      <div class="team">${esc(r.batting_team)}<div class="bar"><div class="fill" style="width:${r.batting_pct}%"></div></div>${r.batting_pct}%</div>
      <div class="team">${esc(r.bowling_team)}<div class="bar"><div class="fill" style="width:${r.bowling_pct}%"></div></div>${r.bowling_pct}%</div>
      <div class="muted">${s.runs_left} needed off ${s.balls_left} balls · ${s.wickets_left} wickets left · CRR ${s.crr.toFixed(2)} · RRR ${s.rrr.toFixed(2)}</div>`;
  }
}

document.getElementById('form').addEventListener('submit', async e => {
  e.preventDefault();
  const body = Object.fromEntries(new FormData(e.target).entries());
  try {
    const r = await (await fetch('/api/submit', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(body)
    })).json();
    if (r.ticket > latest) { latest = r.ticket; show(r); }
  } catch (err) {
    show({ kind: 'error', message: 'Error getting prediction. Please try again.' });
  }
});

loadDomains();
</script>
</body>
</html>
"#;
