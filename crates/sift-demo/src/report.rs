//! Plain-text rendering of a result page.

use sift::Paginated;

/// Renders `rows` under `headers` as left-aligned, space-padded columns.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = render_line(headers, &widths);
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in rows {
        out.push_str(&render_line(row, &widths));
        out.push('\n');
    }
    out
}

fn render_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Page summary line, e.g. `page 2 of 3 (25 results)  [1] 2 [3]`.
///
/// The current page is bare, other pages are bracketed and gaps show as
/// `...`.
pub fn footer<T>(page: &Paginated<T>) -> String {
    let noun = if page.total_count == 1 { "result" } else { "results" };
    let summary = format!(
        "page {} of {} ({} {noun})",
        page.page,
        page.total_pages.max(1),
        page.total_count
    );

    let window = page.window();
    if window.len() <= 1 {
        return summary;
    }
    let links: Vec<String> = window
        .into_iter()
        .map(|entry| match entry {
            Some(n) if n == page.page => n.to_string(),
            Some(n) => format!("[{n}]"),
            None => "...".to_string(),
        })
        .collect();
    format!("{summary}  {}", links.join(" "))
}
