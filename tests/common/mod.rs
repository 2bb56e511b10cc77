//! Shared fixtures for the readable view test suite

use kodegen_tools_readable::ReadableConfig;

/// Wrap body markup in a minimal HTML document
#[allow(dead_code)]
pub fn create_test_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
</head>
<body>
{body}
</body>
</html>"#
    )
}

/// Config with a base URL so links resolve and origins can be compared
#[allow(dead_code)]
pub fn config_for(url: &str) -> ReadableConfig {
    ReadableConfig::builder()
        .base_url(url)
        .build()
        .expect("fixture config is valid")
}

/// A product landing page touching every output section
#[allow(dead_code)]
pub fn landing_page() -> String {
    create_test_html(
        "Acme Cloud | Hosting",
        r#"
<header>
  <span class="logo">Acme Cloud</span>
  <nav>
    <a href="/features">Features</a>
    <a href="/pricing">Pricing</a>
    <a href="/privacy">Privacy</a>
  </nav>
  <a class="btn" href="/signup">Start free trial</a>
</header>
<main>
  <h1>Deploy in seconds</h1>
  <p>Ship your apps with one command and zero config.</p>
  <ul><li>Global edge network</li><li>Instant rollbacks</li></ul>

  <h2>Pricing</h2>
  <table>
    <tr><th>Plan</th><th>Price</th></tr>
    <tr><td>Pro</td><td>$10</td></tr>
  </table>

  <h2>Questions</h2>
  <p>Read the <a href="https://docs.other.com/start">Guide</a> for details.</p>
</main>
<footer>
  <a href="/about">About</a>
  <a href="https://status.acme.io">Status</a>
</footer>
"#,
    )
}

/// The bordered table the `Plan`/`Price` fixture renders to
#[allow(dead_code)]
pub const PLAN_PRICE_TABLE: &str = "\n\
+----------+----------+\n\
| Plan     | Price    |\n\
+----------+----------+\n\
| Pro      | 10       |\n\
+----------+----------+\n";
