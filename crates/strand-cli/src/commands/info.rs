use comfy_table::{ContentArrangement, Table};

use strand_core::QualityFormat;

use crate::demo;

pub fn run() -> Result<(), String> {
    let story = demo::build();
    story.validate().map_err(|e| e.to_string())?;

    let mut situations: Vec<_> = story.situations().collect();
    situations.sort_by_key(|(id, _)| *id);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Priority", "Frequency", "Order", "Tags", "Label"]);
    for (id, situation) in &situations {
        let meta = situation.meta();
        table.add_row(vec![
            (*id).to_string(),
            meta.priority.to_string(),
            meta.frequency.to_string(),
            meta.display_order.to_string(),
            meta.tags.join(", "),
            meta.choice_label.unwrap_or_else(|| "-".to_string()),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} situations, start: {}", situations.len(), story.start());
    println!();

    let mut qualities: Vec<_> = story.quality_definitions().collect();
    qualities.sort_by_key(|(name, _)| *name);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Quality", "Title", "Format", "Group"]);
    for (name, def) in &qualities {
        let group = def
            .group
            .as_deref()
            .and_then(|g| story.group(g))
            .and_then(|g| g.title.as_deref())
            .unwrap_or("-");
        table.add_row(vec![
            (*name).to_string(),
            def.title.clone(),
            format_name(&def.format),
            group.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn format_name(format: &QualityFormat) -> String {
    match format {
        QualityFormat::Integer => "integer".to_string(),
        QualityFormat::NonZeroInteger => "non-zero integer".to_string(),
        QualityFormat::Numeric => "numeric".to_string(),
        QualityFormat::OnOff => "on/off".to_string(),
        QualityFormat::YesNo => "yes/no".to_string(),
        QualityFormat::WordScale { words, .. } => format!("word scale ({} words)", words.len()),
    }
}
