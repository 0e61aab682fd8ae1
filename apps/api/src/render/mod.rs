//! Presentation transforms: pure functions from a milestone list to a view model.
//!
//! Every transform preserves input order exactly and renders nothing for an
//! empty list. Pixels are the client's job.

use serde::{Deserialize, Serialize};

use crate::flows::roadmap::Period;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowchartCard {
    pub label: String,
    pub title: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccordionSection {
    pub id: String,
    pub heading: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    /// Bars share one height; the period is the information.
    pub value: u8,
    pub tooltip: ChartTooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTooltip {
    pub heading: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewFormat {
    Flowchart,
    Accordion,
    Chart,
    Text,
    Mermaid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", content = "content", rename_all = "lowercase")]
pub enum RoadmapView {
    Flowchart(Vec<FlowchartCard>),
    Accordion(Vec<AccordionSection>),
    Chart(Vec<ChartPoint>),
    Text(String),
    Mermaid(String),
}

pub fn render<M: Period>(format: ViewFormat, milestones: &[M]) -> RoadmapView {
    match format {
        ViewFormat::Flowchart => RoadmapView::Flowchart(flowchart(milestones)),
        ViewFormat::Accordion => RoadmapView::Accordion(accordion(milestones)),
        ViewFormat::Chart => RoadmapView::Chart(bar_chart(milestones)),
        ViewFormat::Text => RoadmapView::Text(plain_text(milestones)),
        ViewFormat::Mermaid => RoadmapView::Mermaid(flowchart_markup(milestones)),
    }
}

fn heading<M: Period>(m: &M) -> String {
    format!("{}: {}", m.label(), m.title())
}

pub fn flowchart<M: Period>(milestones: &[M]) -> Vec<FlowchartCard> {
    milestones
        .iter()
        .map(|m| FlowchartCard {
            label: m.label(),
            title: m.title().to_string(),
            tasks: m.tasks().to_vec(),
        })
        .collect()
}

pub fn accordion<M: Period>(milestones: &[M]) -> Vec<AccordionSection> {
    milestones
        .iter()
        .map(|m| AccordionSection {
            id: format!("{}-{}", M::UNIT.to_lowercase(), m.index()),
            heading: heading(m),
            tasks: m.tasks().to_vec(),
        })
        .collect()
}

pub fn bar_chart<M: Period>(milestones: &[M]) -> Vec<ChartPoint> {
    milestones
        .iter()
        .map(|m| ChartPoint {
            name: m.short_label(),
            value: 1,
            tooltip: ChartTooltip {
                heading: heading(m),
                tasks: m.tasks().to_vec(),
            },
        })
        .collect()
}

pub fn plain_text<M: Period>(milestones: &[M]) -> String {
    let mut out = String::new();
    for m in milestones {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&heading(m));
        out.push('\n');
        for task in m.tasks() {
            out.push_str("  - ");
            out.push_str(task);
            out.push('\n');
        }
    }
    out
}

/// Mermaid `graph TD` markup: one node per milestone, chained in input order.
pub fn flowchart_markup<M: Period>(milestones: &[M]) -> String {
    if milestones.is_empty() {
        return String::new();
    }

    let mut lines = vec!["graph TD".to_string()];
    for (i, m) in milestones.iter().enumerate() {
        lines.push(format!(
            "    N{i}[\"{}<br/>{}\"]",
            escape_markup(&m.label()),
            escape_markup(m.title())
        ));
    }
    for i in 1..milestones.len() {
        lines.push(format!("    N{} --> N{i}", i - 1));
    }
    lines.join("\n")
}

fn escape_markup(text: &str) -> String {
    text.replace('"', "#quot;")
        .replace('<', "#lt;")
        .replace('>', "#gt;")
}
