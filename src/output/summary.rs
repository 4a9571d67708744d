use std::fmt::Write;

use comfy_table::Cell;

use crate::pipeline::GitInfo;
use crate::report::PipelineStateReport;

use super::styling::{bright, cyan, dim};
use super::tables::{create_table, header_cells, optional_cell, status_cell};

/// Renders a human-readable view of a pipeline's stage states.
///
/// One row per action; the stage name and status are only shown on the first
/// action of each stage. Stages without actions still get a row.
pub fn render_state_summary(report: &PipelineStateReport) -> String {
    let mut output = String::new();

    add_section_header(&mut output, "📋", &format!("Pipeline {}", report.pipeline));
    let _ = writeln!(
        output,
        "  {} {}  {} {}  {} {}\n",
        dim("Stages:"),
        cyan(report.total_stages),
        dim("Actions:"),
        cyan(report.total_actions),
        dim("Collected:"),
        cyan(report.collected_at.format("%Y-%m-%d %H:%M:%S UTC")),
    );

    if report.stages.is_empty() {
        let _ = writeln!(output, "  {}", dim("No stages reported"));
        return output;
    }

    let mut table = create_table();
    table.set_header(header_cells(&[
        "Stage",
        "Stage Status",
        "Action",
        "Action Status",
        "Revision",
        "Last Change",
    ]));

    for stage in &report.stages {
        if stage.actions.is_empty() {
            table.add_row(vec![
                Cell::new(&stage.name),
                status_cell(stage.status.as_deref()),
                optional_cell(None),
                optional_cell(None),
                optional_cell(None),
                optional_cell(None),
            ]);
            continue;
        }

        for (index, action) in stage.actions.iter().enumerate() {
            let (stage_cell, stage_status) = if index == 0 {
                (Cell::new(&stage.name), status_cell(stage.status.as_deref()))
            } else {
                (Cell::new(""), Cell::new(""))
            };
            let last_change = action
                .last_status_change
                .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string());

            table.add_row(vec![
                stage_cell,
                stage_status,
                Cell::new(&action.name),
                status_cell(action.status.as_deref()),
                optional_cell(action.current_revision.as_deref()),
                optional_cell(last_change.as_deref()),
            ]);
        }
    }

    let _ = writeln!(output, "{table}");
    output
}

/// Renders the git provenance of a pipeline.
pub fn render_git_info(pipeline: &str, info: &GitInfo) -> String {
    let mut output = String::new();

    add_section_header(&mut output, "🔗", &format!("Git source of {pipeline}"));

    let mut table = create_table();
    table.set_header(header_cells(&["Organization", "Repository", "Revision"]));
    table.add_row(vec![
        Cell::new(info.org_name()),
        Cell::new(info.repo_name()),
        Cell::new(info.revision()),
    ]);

    let _ = writeln!(output, "{table}");
    output
}

fn add_section_header(output: &mut String, emoji: &str, title: &str) {
    let _ = writeln!(output, "{} {}", bright(emoji), bright(title).underlined());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{ActionState, StageState};

    fn action(name: &str, revision: Option<&str>) -> ActionState {
        ActionState {
            name: name.to_string(),
            status: Some("Succeeded".to_string()),
            current_revision: revision.map(ToString::to_string),
            entity_url: None,
            last_status_change: chrono::DateTime::from_timestamp(1_700_000_000, 0),
        }
    }

    #[test]
    fn test_render_state_summary_lists_every_action() {
        let report = PipelineStateReport::new(
            "my-pipeline",
            vec![
                StageState {
                    name: "Source".to_string(),
                    status: Some("Succeeded".to_string()),
                    actions: vec![action("Source", Some("abc123"))],
                },
                StageState {
                    name: "Deploy".to_string(),
                    status: Some("InProgress".to_string()),
                    actions: vec![action("Beta", None), action("Prod", None)],
                },
                StageState {
                    name: "Approval".to_string(),
                    status: None,
                    actions: Vec::new(),
                },
            ],
        );

        let rendered = render_state_summary(&report);

        assert!(rendered.contains("my-pipeline"));
        for expected in ["Source", "abc123", "Deploy", "Beta", "Prod", "Approval", "2023-11-14"] {
            assert!(rendered.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_render_state_summary_without_stages() {
        let report = PipelineStateReport::new("empty", Vec::new());

        assert!(render_state_summary(&report).contains("No stages reported"));
    }
}
