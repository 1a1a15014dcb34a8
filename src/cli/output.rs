use anyhow::Result;
use serde_json::json;

use homescout::Listing;

use crate::workflow::SearchSummary;

/// Print a plain-text representation of the search summary.
pub(crate) fn print_plain(summary: &SearchSummary) {
    if summary.filtered.is_empty() {
        println!("No matching listings (searched {})", summary.total);
    } else {
        for listing in &summary.filtered {
            println!("{}", plain_line(listing));
        }
        println!(
            "{} of {} listings match, {} in view",
            summary.filtered.len(),
            summary.total,
            summary.visible.len()
        );
    }

    if !summary.address.is_empty() {
        println!("address: ?{}", summary.address);
    }
}

fn plain_line(listing: &Listing) -> String {
    let mut line = format!("{}\t{}", listing.id, listing.price);
    if !listing.property_type.is_empty() {
        line.push('\t');
        line.push_str(&listing.property_type);
    }
    if !listing.city.is_empty() {
        line.push('\t');
        line.push_str(&listing.city);
    }
    line
}

/// Format the search summary as a JSON string.
pub(crate) fn format_summary_json(summary: &SearchSummary) -> Result<String> {
    let payload = json!({
        "address": summary.address,
        "total": summary.total,
        "matched": summary.filtered.len(),
        "listings": summary.filtered,
        "visible": summary.visible.iter().map(|l| &l.id).collect::<Vec<_>>(),
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the search summary.
pub(crate) fn print_json(summary: &SearchSummary) -> Result<()> {
    println!("{}", format_summary_json(summary)?);
    Ok(())
}
