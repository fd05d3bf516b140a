use crate::models::pagination::PageSize;
use crate::models::record::Record;
use crate::models::state::ViewState;
use serde::Serialize;
use tera::{Context, Tera};

pub const PLACEHOLDER: &str = "N/A";

pub const COLUMNS: [&str; 5] = [
    "Ratings Average",
    "Author Name",
    "Title",
    "First Published Year",
    "Subject",
];

const VIEW_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Admin Dashboard</title>
</head>
<body>
<h1>ADMIN DASHBOARD</h1>
<div class="controls">
  <form method="post" action="/page-size">
    Show
    <select name="size" onchange="this.form.submit()">
    {%- for size in page_sizes %}
      <option value="{{ size }}"{% if size == page_size %} selected{% endif %}>{{ size }}</option>
    {%- endfor %}
    </select>
    entries
    <noscript><button type="submit">Apply</button></noscript>
  </form>
  <form method="post" action="/sort/toggle">
    <button type="submit" title="Sort by {{ sort_key }}">Sort {{ sort_glyph }}</button>
  </form>
  {% include "pager.html" %}
</div>
<table>
  <thead>
    <tr>{% for column in columns %}<th>{{ column }}</th>{% endfor %}</tr>
  </thead>
  <tbody>
  {%- for row in rows %}
    <tr><td>{{ row.rating }}</td><td>{{ row.authors }}</td><td>{{ row.title }}</td><td>{{ row.year }}</td><td>{{ row.subject }}</td></tr>
  {%- endfor %}
  </tbody>
</table>
<div class="controls">
  {% include "pager.html" %}
</div>
</body>
</html>
"#;

const PAGER_TEMPLATE: &str = r#"<form method="post" action="/page/previous"><button type="submit"{% if not has_previous %} disabled{% endif %}>Previous</button></form>
  <span>Page {{ current_page }} of {{ total_pages }}</span>
  <form method="post" action="/page/next"><button type="submit"{% if not has_next %} disabled{% endif %}>Next</button></form>"#;

/// Display cells for one table row, placeholders already applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub rating: String,
    pub authors: String,
    pub title: String,
    pub year: String,
    pub subject: String,
}

impl RowView {
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.rating,
            &self.authors,
            &self.title,
            &self.year,
            &self.subject,
        ]
    }
}

impl From<&Record> for RowView {
    fn from(record: &Record) -> Self {
        Self {
            rating: or_placeholder(record.ratings_average.map(|r| r.to_string())),
            authors: or_placeholder(
                record
                    .author_name
                    .as_ref()
                    .filter(|names| !names.is_empty())
                    .map(|names| names.join(", ")),
            ),
            title: or_placeholder(record.title.clone().filter(|t| !t.is_empty())),
            year: or_placeholder(record.first_publish_year.map(|y| y.to_string())),
            subject: or_placeholder(record.primary_subject().map(str::to_string)),
        }
    }
}

fn or_placeholder(value: Option<String>) -> String {
    value.unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Everything the view shows, derived from the state.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub columns: [&'static str; 5],
    pub page_sizes: Vec<u32>,
    pub page_size: u32,
    pub sort_key: &'static str,
    pub sort_glyph: &'static str,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub rows: Vec<RowView>,
}

impl From<&ViewState> for PageView {
    fn from(state: &ViewState) -> Self {
        let sort = state.sort();
        Self {
            columns: COLUMNS,
            page_sizes: PageSize::ALL.into_iter().map(u32::from).collect(),
            page_size: u32::from(state.page_size()),
            sort_key: sort.key.as_str(),
            sort_glyph: sort.direction.glyph(),
            current_page: state.current_page(),
            total_pages: state.total_pages(),
            has_previous: state.has_previous(),
            has_next: state.has_next(),
            rows: state
                .current_page_records()
                .into_iter()
                .map(RowView::from)
                .collect(),
        }
    }
}

/// Renders the view as an HTML page. Cell text is escaped.
pub fn render_html(state: &ViewState) -> Result<String, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![("pager.html", PAGER_TEMPLATE), ("view.html", VIEW_TEMPLATE)])?;
    tera.autoescape_on(vec![".html"]);

    let context = Context::from_serialize(PageView::from(state))?;
    tera.render("view.html", &context)
}

/// Renders the current page as a plain text table.
pub fn render_text(state: &ViewState) -> String {
    let view = PageView::from(state);

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &view.rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 5]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format!(
        "Sort {} by {} | {} entries per page\n",
        view.sort_glyph, view.sort_key, view.page_size
    ));
    out.push_str(&line(COLUMNS));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &view.rows {
        out.push_str(&line(row.cells()));
        out.push('\n');
    }
    out.push_str(&format!(
        "Page {} of {}\n",
        view.current_page, view.total_pages
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::state::Action;

    fn bare_record() -> Record {
        Record::titled("Bare")
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let row = RowView::from(&bare_record());

        assert_eq!(row.rating, "N/A");
        assert_eq!(row.authors, "N/A");
        assert_eq!(row.title, "Bare");
        assert_eq!(row.year, "N/A");
        assert_eq!(row.subject, "N/A");
    }

    #[test]
    fn populated_fields_render_their_values() {
        let record = Record {
            title: Some("The Hobbit".into()),
            author_name: Some(vec!["J.R.R. Tolkien".into(), "Alan Lee".into()]),
            first_publish_year: Some(1937),
            ratings_average: Some(4.25),
            subject: Some(vec!["Fantasy".into(), "Dragons".into()]),
        };

        let row = RowView::from(&record);

        assert_eq!(
            row.cells(),
            ["4.25", "J.R.R. Tolkien, Alan Lee", "The Hobbit", "1937", "Fantasy"]
        );
    }

    #[test]
    fn empty_lists_render_placeholders() {
        let record = Record {
            author_name: Some(Vec::new()),
            subject: Some(Vec::new()),
            ..bare_record()
        };

        let row = RowView::from(&record);

        assert_eq!(row.authors, "N/A");
        assert_eq!(row.subject, "N/A");
    }

    #[test]
    fn html_view_shows_controls_and_escapes_cells() {
        let state = ViewState::default().reduce(Action::LoadSucceeded(vec![
            Record::titled("Fish & <Chips>"),
            bare_record(),
        ]));

        let html = render_html(&state).unwrap();

        assert!(html.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(!html.contains("<Chips>"));
        assert!(html.contains("Sort ▲"));
        assert_eq!(html.matches("Page 1 of 1").count(), 2);
        assert_eq!(html.matches("disabled>Previous").count(), 2);
        assert_eq!(html.matches("disabled>Next").count(), 2);
        assert!(html.contains(r#"<option value="10" selected>10</option>"#));
        for column in COLUMNS {
            assert!(html.contains(&format!("<th>{}</th>", column)));
        }
    }

    #[test]
    fn html_view_of_empty_dataset_has_no_rows() {
        let state = ViewState::default().reduce(Action::LoadFailed("offline".into()));

        let html = render_html(&state).unwrap();

        assert!(html.contains("Page 1 of 0"));
        assert!(!html.contains("<td>"));
    }

    #[test]
    fn descending_view_shows_down_glyph() {
        let state = ViewState::default().reduce(Action::ToggleSort);
        assert!(render_html(&state).unwrap().contains("Sort ▼"));
    }

    #[test]
    fn text_table_lists_current_page() {
        let state = ViewState::default().reduce(Action::LoadSucceeded(vec![
            Record::titled("B"),
            Record::titled("A"),
        ]));

        let text = render_text(&state);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Sort ▲ by title | 10 entries per page");
        assert!(lines[1].starts_with("Ratings Average | Author Name | Title"));
        assert!(lines[3].contains("| A "));
        assert!(lines[4].contains("| B "));
        assert_eq!(lines.last(), Some(&"Page 1 of 1"));
    }
}
