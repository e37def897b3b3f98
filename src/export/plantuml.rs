//! PlantUML text for diagram models

use crate::diagram::{SequenceDiagram, StateDiagram};
use crate::model::ShortNamePath;

/// Render a sequence diagram
///
/// Participants get positional aliases so that components with the same
/// short name in different packages stay distinct.
pub fn sequence_to_plantuml(diagram: &SequenceDiagram) -> String {
    let participants = diagram.participants();
    let alias = |path: &ShortNamePath| {
        let position = participants.iter().position(|p| *p == path).unwrap_or_default();
        format!("p{}", position)
    };

    let mut lines = vec!["@startuml".to_string()];
    if let Some(target) = &diagram.target {
        lines.push(format!("title {}", quote(&target.to_string())));
    }
    for (i, path) in participants.iter().enumerate() {
        lines.push(format!("participant {} as p{}", quote(display_name(path)), i));
    }
    lines.push("autonumber 0".to_string());
    for step in &diagram.interactions {
        lines.push(format!(
            "{} -> {} : {} ({})",
            alias(&step.caller),
            alias(&step.callee),
            single_line(&step.operation),
            step.access_kind.label()
        ));
    }
    lines.push("@enduml".to_string());
    lines.join("\n") + "\n"
}

/// Render a state diagram
///
/// Unreachable states get a note instead of being dropped.
pub fn state_to_plantuml(diagram: &StateDiagram) -> String {
    let alias = |path: &ShortNamePath| {
        let position = diagram
            .states
            .iter()
            .position(|s| &s.path == path)
            .unwrap_or_default();
        format!("s{}", position)
    };

    let mut lines = vec![
        "@startuml".to_string(),
        format!("title {}", quote(&diagram.component.to_string())),
    ];
    for (i, state) in diagram.states.iter().enumerate() {
        lines.push(format!("state {} as s{}", quote(&state.name), i));
    }
    for (i, state) in diagram.states.iter().enumerate() {
        if state.initial {
            lines.push(format!("[*] --> s{}", i));
        }
        if state.unreachable {
            lines.push(format!("note right of s{} : unreachable", i));
        }
    }
    for edge in &diagram.transitions {
        let mut label = edge.event_name.clone().unwrap_or_default();
        if let Some(guard) = &edge.guard {
            if !label.is_empty() {
                label.push(' ');
            }
            label.push_str(&format!("[{}]", single_line(guard)));
        }
        let arrow = format!("{} --> {}", alias(&edge.source), alias(&edge.target));
        if label.is_empty() {
            lines.push(arrow);
        } else {
            lines.push(format!("{} : {}", arrow, label));
        }
    }
    lines.push("@enduml".to_string());
    lines.join("\n") + "\n"
}

fn display_name(path: &ShortNamePath) -> &str {
    path.name().unwrap_or("/")
}

fn quote(text: &str) -> String {
    format!("\"{}\"", single_line(text).replace('"', "'"))
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
