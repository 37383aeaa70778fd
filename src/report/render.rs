//! HTML status page rendering using minijinja templating.

use std::fs;
use std::path::Path;

use minijinja::{context, Environment};

use crate::core::Result;
use crate::report::ReportContext;

/// The embedded status page template.
const TEMPLATE_HTML: &str = include_str!("template.html");

/// Renderer handles HTML status page generation.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Create a new renderer with the embedded template.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_filter("tier_gauge", tier_gauge);
        env.add_filter("tier_detail", tier_detail);
        env.add_template("status", TEMPLATE_HTML)?;
        Ok(Self { env })
    }

    /// Render one (version, installer) page to a string.
    pub fn render(&self, ctx: &ReportContext) -> Result<String> {
        let tmpl = self.env.get_template("status")?;
        let rendered = tmpl.render(context! {
            version => &ctx.version,
            installer => &ctx.installer,
            period => ctx.period,
            date => &ctx.date,
            published_url => ctx.published_url(),
            testcases => &ctx.testcases,
        })?;
        Ok(rendered)
    }

    /// Render one page to `<dir>/status-<installer>.html`.
    pub fn render_to_file(&self, ctx: &ReportContext, dir: &Path) -> Result<()> {
        let output = self.render(ctx)?;
        let path = dir.join(format!("status-{}.html", ctx.installer));
        fs::write(&path, output)?;
        tracing::info!(path = %path.display(), "status page written");
        Ok(())
    }
}

/// Unicode gauge for a tier, e.g. "●●●○" for passing.
fn tier_gauge(tier: &str) -> String {
    let filled = match tier {
        "stable" => 4,
        "passing" => 3,
        "marginal" => 2,
        "failing" => 1,
        _ => 0,
    };
    let mut gauge = String::new();
    for i in 0..4 {
        gauge.push(if i < filled { '●' } else { '○' });
    }
    gauge
}

/// "x/3" score column matching the history ledger.
fn tier_detail(tier: &str) -> String {
    let score = match tier {
        "stable" => 3,
        "passing" => 2,
        "marginal" => 1,
        _ => 0,
    };
    format!("{score}/3")
}
