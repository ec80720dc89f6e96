//! The single HTML page: a chart redrawn from `/api/chart` on a fixed interval.

use axum::{extract::State, response::Html, routing::get, Router};

use crate::config::Config;
use crate::types::CrossoverKind;
use crate::AppState;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
<style>
  body { font-family: sans-serif; margin: 1.5rem; }
  #status { color: #888; font-size: 0.85rem; }
</style>
</head>
<body>
<h2>{{TITLE}}</h2>
<div id="live-candlestick-graph" style="height: 640px"></div>
<div id="status"></div>
<script>
const REFRESH_MS = {{REFRESH_MS}};
let tick = 0;

function traces(p) {
  const t = (ms) => new Date(ms);
  const buys = p.markers.filter((m) => m.kind === "buy");
  const sells = p.markers.filter((m) => m.kind === "sell");
  return [
    {
      type: "candlestick", name: "Candlestick Data",
      x: p.candles.map((c) => t(c.time)),
      open: p.candles.map((c) => c.open), high: p.candles.map((c) => c.high),
      low: p.candles.map((c) => c.low), close: p.candles.map((c) => c.close),
    },
    {
      type: "scatter", mode: "lines", name: "Short-term MA (" + p.shortWindow + ")",
      x: p.signals.map((r) => t(r.time)), y: p.signals.map((r) => r.shortMa),
      line: { color: "orange" },
    },
    {
      type: "scatter", mode: "lines", name: "Long-term MA (" + p.longWindow + ")",
      x: p.signals.map((r) => t(r.time)), y: p.signals.map((r) => r.longMa),
      line: { color: "green" },
    },
    {
      type: "scatter", mode: "markers", name: "{{BUY_LABEL}}",
      x: buys.map((m) => t(m.time)), y: buys.map((m) => m.price),
      marker: { symbol: "triangle-up", size: 10, color: "green" },
    },
    {
      type: "scatter", mode: "markers", name: "{{SELL_LABEL}}",
      x: sells.map((m) => t(m.time)), y: sells.map((m) => m.price),
      marker: { symbol: "triangle-down", size: 10, color: "red" },
    },
  ];
}

async function refresh() {
  const status = document.getElementById("status");
  try {
    const res = await fetch("/api/chart?tick=" + tick);
    const body = await res.json();
    if (!res.ok) throw new Error(body.error || res.statusText);
    const p = body.data;
    Plotly.react("live-candlestick-graph", traces(p), {
      title: p.symbol + " with Moving Average Crossover Strategy",
      xaxis: { title: "Date", rangeslider: { visible: false } },
      yaxis: { title: "Price" },
      showlegend: true,
    });
    status.textContent = "Updated " + new Date(p.generatedAt).toLocaleTimeString() + " (tick " + p.tick + ")";
  } catch (e) {
    status.textContent = "Refresh failed: " + e.message;
  }
  tick += 1;
}

refresh();
setInterval(refresh, REFRESH_MS);
</script>
</body>
</html>
"#;

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the page for the given configuration.
pub fn render_page(config: &Config) -> String {
    PAGE_TEMPLATE
        .replace("{{TITLE}}", &escape_html(&config.chart.title))
        .replace("{{BUY_LABEL}}", CrossoverKind::Buy.label())
        .replace("{{SELL_LABEL}}", CrossoverKind::Sell.label())
        .replace(
            "{{REFRESH_MS}}",
            &(config.refresh_interval_secs.max(1) * 1000).to_string(),
        )
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.config))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;

    fn config(title: &str, refresh: u64) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8057,
            refresh_interval_secs: refresh,
            provider_timeout_secs: 30,
            chart: ChartConfig {
                title: title.to_string(),
                ..ChartConfig::default()
            },
        }
    }

    #[test]
    fn test_render_page() {
        let html = render_page(&config("BTC Crossover", 60));
        assert!(html.contains("<h2>BTC Crossover</h2>"));
        assert!(html.contains("const REFRESH_MS = 60000;"));
        assert!(html.contains(r#"name: "Buy Signal""#));
        assert!(html.contains(r#"name: "Sell Signal""#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_render_page_escapes_title() {
        let html = render_page(&config("<b>A & B</b>", 0));
        assert!(html.contains("&lt;b&gt;A &amp; B&lt;/b&gt;"));
        assert!(html.contains("const REFRESH_MS = 1000;"));
    }
}
