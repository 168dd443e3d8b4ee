use anyhow::Result;
use colored::Colorize;
use packlist_core::{Cart, DestinationGuide, PackingItem, PackingList, Priority};
use serde::Serialize;
use std::io::Write;

/// Everything one run produced, as rendered by every report format.
#[derive(Debug, Serialize)]
pub struct ListReport<'a> {
    pub list_code: String,
    pub seed: u64,
    pub list: &'a PackingList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart: Option<&'a Cart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide: Option<&'a DestinationGuide>,
}

fn tier_heading(priority: Priority) -> &'static str {
    match priority {
        Priority::Essential => "Essentials",
        Priority::Recommended => "Recommended",
        Priority::Optional => "Nice to have",
    }
}

fn format_rupees(amount: u64) -> String {
    format!("₹{amount}")
}

pub fn generate_console_report(out: &mut dyn Write, report: &ListReport<'_>) -> Result<()> {
    let list = report.list;
    let profile = list.trip_profile();
    writeln!(out)?;
    writeln!(out, "{}", "🧳 Packing List Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=======================".cyan())?;
    writeln!(
        out,
        "Trip: {} ({}, {} days, {} travelers)",
        profile.destination.bold(),
        profile.trip_type,
        profile.duration,
        profile.travelers
    )?;
    if let Some(climate) = profile.climate {
        writeln!(out, "Climate: {climate}")?;
    }
    if let Some(occasion) = &profile.occasion {
        writeln!(out, "Occasion: {occasion}")?;
    }
    writeln!(out, "List code: {}", report.list_code.bright_yellow())?;
    writeln!(
        out,
        "Items: {} total, {} selected ({:.0}% packed)",
        list.total_items(),
        list.selected_count().to_string().green(),
        list.progress_ratio() * 100.0
    )?;

    for priority in Priority::ALL {
        let items: Vec<&PackingItem> = list.items_with_priority(priority).collect();
        if items.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{}", tier_heading(priority).bold())?;
        for item in items {
            let mark = if item.is_selected {
                "[x]".green()
            } else {
                "[ ]".normal()
            };
            writeln!(
                out,
                "  {mark} {} x{} ({})",
                item.name, item.quantity, item.category
            )?;
            if let Some(product) = &item.product {
                writeln!(
                    out,
                    "      → {} {}",
                    product.title.italic(),
                    format_rupees(product.price)
                )?;
            }
            writeln!(out, "      {}", item.reason.dimmed())?;
        }
    }

    if let Some(cart) = report.cart {
        writeln!(out)?;
        writeln!(out, "{}", "🛒 Cart".bright_yellow().bold())?;
        if cart.is_empty() {
            writeln!(out, "  (empty)")?;
        }
        for line in cart.lines() {
            writeln!(
                out,
                "  {} x{} = {}",
                line.product.title,
                line.quantity,
                format_rupees(line.line_total())
            )?;
        }
        writeln!(
            out,
            "Total: {} for {} units (you save {})",
            format_rupees(cart.total_price()).green(),
            cart.total_units(),
            format_rupees(cart.savings())
        )?;
    }

    if let Some(guide) = report.guide {
        writeln!(out)?;
        writeln!(out, "{}", format!("🗺  {} guide", guide.name).bright_cyan().bold())?;
        writeln!(out, "{} · {}", guide.kind, guide.climate)?;
        writeln!(out, "{}", guide.description)?;
        for group in &guide.packing_list {
            writeln!(out, "  {}: {}", group.category.bold(), group.items.join(", "))?;
        }
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, report: &ListReport<'_>) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, report: &ListReport<'_>) -> Result<()> {
    let list = report.list;
    let profile = list.trip_profile();
    writeln!(out, "# Packing list for {}\n", profile.destination)?;
    writeln!(
        out,
        "- Trip: {}, {} days, {} travelers",
        profile.trip_type, profile.duration, profile.travelers
    )?;
    if let Some(climate) = profile.climate {
        writeln!(out, "- Climate: {climate}")?;
    }
    writeln!(out, "- List code: `{}`", report.list_code)?;
    writeln!(
        out,
        "- Generated: {}",
        list.generated_at().format("%Y-%m-%d %H:%M UTC")
    )?;
    writeln!(
        out,
        "- Selected: {}/{}",
        list.selected_count(),
        list.total_items()
    )?;

    for priority in Priority::ALL {
        let mut items = list.items_with_priority(priority).peekable();
        if items.peek().is_none() {
            continue;
        }
        writeln!(out, "\n## {}\n", tier_heading(priority))?;
        writeln!(out, "| | Item | Qty | Category | Product | Reason |")?;
        writeln!(out, "|---|---|---|---|---|---|")?;
        for item in items {
            let product = item.product.as_ref().map_or_else(String::new, |p| {
                format!("{} ({})", p.title, format_rupees(p.price))
            });
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                if item.is_selected { "☑" } else { "☐" },
                item.name,
                item.quantity,
                item.category,
                product,
                item.reason
            )?;
        }
    }

    if let Some(cart) = report.cart {
        writeln!(out, "\n## Cart\n")?;
        for line in cart.lines() {
            writeln!(
                out,
                "- {} x{}: {}",
                line.product.title,
                line.quantity,
                format_rupees(line.line_total())
            )?;
        }
        writeln!(out, "\n**Total:** {}", format_rupees(cart.total_price()))?;
    }

    if let Some(guide) = report.guide {
        writeln!(out, "\n## Destination guide: {}\n", guide.name)?;
        writeln!(out, "_{} · {}_\n", guide.kind, guide.climate)?;
        for group in &guide.packing_list {
            writeln!(out, "- **{}**: {}", group.category, group.items.join(", "))?;
        }
    }
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn generate_csv_report(out: &mut dyn Write, report: &ListReport<'_>) -> Result<()> {
    writeln!(
        out,
        "id,priority,category,name,quantity,selected,product_id,product_title,price"
    )?;
    for item in report.list.items() {
        let (product_id, product_title, price) = item.product.as_ref().map_or_else(
            || (String::new(), String::new(), String::new()),
            |p| (p.id.clone(), p.title.clone(), p.price.to_string()),
        );
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            csv_field(&item.id),
            item.priority,
            csv_field(&item.category),
            csv_field(&item.name),
            item.quantity,
            item.is_selected,
            csv_field(&product_id),
            csv_field(&product_title),
            price
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use packlist_core::{Climate, TripProfile, TripType, generate_seeded, sample_catalog};

    fn render(generate: fn(&mut dyn Write, &ListReport<'_>) -> Result<()>) -> String {
        let profile = TripProfile::new("Goa", TripType::Beach, 3, 2).with_climate(Climate::Hot);
        let list = generate_seeded(&profile, sample_catalog().as_slice(), 42);
        let report = ListReport {
            list_code: "BEACH01".to_string(),
            seed: 42,
            list: &list,
            cart: None,
            guide: None,
        };
        let mut buf = Vec::new();
        generate(&mut buf, &report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_has_one_row_per_item() {
        let csv = render(generate_csv_report);
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("id,priority"));
        assert!(lines.all(|line| line.split(',').count() >= 9));
    }

    #[test]
    fn csv_fields_are_quoted_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn markdown_groups_by_tier() {
        let md = render(generate_markdown_report);
        assert!(md.starts_with("# Packing list for Goa"));
        assert!(md.contains("## Essentials"));
        assert!(md.contains("`BEACH01`"));
    }

    #[test]
    fn json_embeds_list_and_code() {
        let json: serde_json::Value = serde_json::from_str(&render(generate_json_report)).unwrap();
        assert_eq!(json["list_code"], "BEACH01");
        assert!(json["list"]["items"].as_array().is_some_and(|items| !items.is_empty()));
        assert!(json.get("cart").is_none());
    }
}
