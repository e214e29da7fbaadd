use binobj_core::{BinaryObjects, MispObject, ParseOutcome};
use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "Section")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Entropy")]
    entropy: String,
    #[tabled(rename = "SHA-256")]
    sha256: String,
}

impl SectionRow {
    fn from_object(obj: &MispObject) -> Self {
        let value = |relation: &str| obj.attribute_value(relation).unwrap_or("-").to_string();
        let entropy = obj
            .attribute_value("entropy")
            .and_then(|e| e.parse::<f64>().ok())
            .map_or_else(|| "-".to_string(), |e| format!("{e:.3}"));
        Self {
            name: value("name"),
            size: value("size-in-bytes"),
            entropy,
            sha256: value("sha256"),
        }
    }
}

fn outcome_line(outcome: &ParseOutcome) -> String {
    match outcome {
        ParseOutcome::Parsed(format) => format!("parsed {format}").green().bold().to_string(),
        ParseOutcome::Unrecognized => "unrecognized".yellow().bold().to_string(),
        ParseOutcome::ParserUnavailable => "no parser available".yellow().bold().to_string(),
        ParseOutcome::MissingSource => "no input".yellow().bold().to_string(),
        ParseOutcome::Failed(failure) => format!("failed: {failure}").red().bold().to_string(),
    }
}

fn print_object(obj: &MispObject) {
    println!("{} {}", obj.name.as_str().bold(), obj.uuid);
    for attr in &obj.attributes {
        println!("  {:<32} {}", attr.object_relation, attr.value);
    }
}

pub fn print_summary(objects: &BinaryObjects) {
    println!("Outcome: {}", outcome_line(&objects.outcome));
    println!();
    print_object(&objects.file);

    if let Some(binary) = &objects.binary {
        println!();
        print_object(binary.object());
    }

    if objects.sections.is_empty() {
        return;
    }
    let rows: Vec<SectionRow> = objects.sections.iter().map(SectionRow::from_object).collect();
    let mut table = Table::new(rows);
    table.with(Style::psql());
    println!();
    println!("{table}");
}
