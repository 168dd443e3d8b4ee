use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "packlist-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn packlist() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_packlist"));
    command
        .env_remove("PACKLIST_SEED")
        .env_remove("PACKLIST_RULES")
        .env_remove("PACKLIST_CATALOG")
        .env("NO_COLOR", "1");
    command
}

fn json_report(args: &[&str]) -> serde_json::Value {
    let output_path = temp_path("json");
    let status = packlist()
        .args(args)
        .args(["--report", "json", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    serde_json::from_str(&content).expect("valid json")
}

#[test]
fn cli_list_destinations_writes_output() {
    let output_path = temp_path("destinations");
    let status = packlist()
        .args(["--list-destinations", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Known destinations"));
    assert!(content.contains("goa (guide available)"));
    assert!(content.contains("darjeeling (guide only)"));
}

#[test]
fn cli_list_code_reproduces_items() {
    let args = [
        "--destination",
        "goa",
        "--trip-type",
        "beach",
        "--duration",
        "3",
        "--climate",
        "hot",
        "--travelers",
        "2",
        "--seed",
        "MONSOON42",
    ];
    let first = json_report(&args);
    let second = json_report(&args);
    assert_eq!(first["list_code"], "MONSOON42");
    assert_eq!(first["list"]["items"], second["list"]["items"]);
    assert_eq!(first["list"]["id"], second["list"]["id"]);

    let items = first["list"]["items"].as_array().unwrap();
    let swimwear = items
        .iter()
        .find(|item| item["name"] == "swimwear")
        .expect("swimwear item");
    assert_eq!(swimwear["priority"], "essential");
    assert_eq!(swimwear["quantity"], 2);
    assert_eq!(swimwear["product"]["category"], "Swimwear");
}

#[test]
fn cli_select_all_and_cart() {
    let report = json_report(&[
        "--destination",
        "goa",
        "--trip-type",
        "beach",
        "--seed",
        "7",
        "--select-all",
        "--add-to-cart",
        "--guide",
    ]);
    let list = &report["list"];
    assert_eq!(list["selected_items"], list["total_items"]);
    let lines = report["cart"]["lines"].as_array().expect("cart lines");
    assert!(!lines.is_empty());
    assert_eq!(report["guide"]["name"], "Goa");
}

#[test]
fn cli_rejects_invalid_trip() {
    let output = packlist()
        .args(["--destination", "goa", "--duration", "0"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least one day"), "{stderr}");
}

#[test]
fn cli_rejects_unknown_trip_type() {
    let output = packlist()
        .args(["--destination", "goa", "--trip-type", "cruise"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown trip type"), "{stderr}");
}

#[test]
fn cli_csv_and_markdown_reports() {
    let csv_path = temp_path("csv");
    let status = packlist()
        .args(["--destination", "Mumbai", "--climate", "rainy", "--seed", "3"])
        .args(["--report", "csv", "--output"])
        .arg(&csv_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let csv = std::fs::read_to_string(csv_path).expect("read csv");
    assert!(csv.starts_with("id,priority,category,name"));
    assert!(csv.lines().count() > 1);

    let md_path = temp_path("md");
    let status = packlist()
        .args(["--destination", "goa", "--guide", "--report", "markdown", "--output"])
        .arg(&md_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let md = std::fs::read_to_string(md_path).expect("read markdown");
    assert!(md.contains("## Essentials"));
    assert!(md.contains("## Destination guide: Goa"));
}

#[test]
fn cli_console_report_with_custom_catalog_and_delay() {
    let catalog_path = temp_path("catalog");
    std::fs::write(
        &catalog_path,
        r#"{"products": [
            {"id": "p1", "title": "Reef Bikini", "category": "Swimwear", "price": 900}
        ]}"#,
    )
    .expect("write catalog");
    let output = packlist()
        .args(["--destination", "goa", "--trip-type", "beach", "--think-ms", "5", "--catalog"])
        .arg(&catalog_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Family Room Packing Assistant"));
    assert!(stdout.contains("Reef Bikini"));
    assert!(stdout.contains("List code"));
}
