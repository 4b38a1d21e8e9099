//! HTML assembly for the dashboard page. Charts arrive as inline SVG
//! strings; everything user-controlled goes through `escape`.

use chrono::NaiveDate;

use crate::config::DashboardSettings;
use crate::models::{CoffeeTypeFilter, Order, ALL_TYPES};

const DATE_MIN: &str = "2022-01-01";

/// The five rendered charts; `None` means the builder saw no data.
pub struct ChartSet {
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub status: Option<String>,
    pub count: Option<String>,
    pub heatmap: Option<String>,
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_dashboard(
    settings: &DashboardSettings,
    selected_type: &CoffeeTypeFilter,
    selected_date: &str,
    today: NaiveDate,
    window: &[Order],
    charts: &ChartSet,
) -> String {
    let mut page = String::with_capacity(16 * 1024);
    page_head(&mut page, &settings.title);

    page.push_str("<div class=\"layout\">");
    sidebar(&mut page, settings, selected_type, selected_date, today, window);

    page.push_str("<main>");
    page.push_str(&format!("<h1>Welcome to {}</h1>", escape(&settings.title)));
    page.push_str(
        "<p>This dashboard presents key insights into the coffee orders over the last 24 hours.</p>",
    );
    page.push_str("<div class=\"grid\">");
    chart_cell(&mut page, &charts.price);
    chart_cell(&mut page, &charts.quantity);
    chart_cell(&mut page, &charts.status);
    chart_cell(&mut page, &charts.count);
    page.push_str("</div>");
    page.push_str("<div class=\"wide\">");
    chart_cell(&mut page, &charts.heatmap);
    page.push_str("</div>");
    page.push_str("</main></div></body></html>");
    page
}

/// Plain failure page shown when the fetch fails; no charts rendered.
pub fn render_failure(settings: &DashboardSettings) -> String {
    let mut page = String::new();
    page_head(&mut page, &settings.title);
    page.push_str("<main><p class=\"notice\">Failed to fetch data from the database.</p></main>");
    page.push_str("</body></html>");
    page
}

fn page_head(page: &mut String, title: &str) {
    page.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    page.push_str(&format!("<title>{}</title>", escape(title)));
    page.push_str(
        "<style>\
         body{margin:0;font-family:sans-serif;background:#FFFBF0;color:#5C4033}\
         .layout{display:flex;align-items:flex-start}\
         aside{width:320px;padding:16px;background:#F3EADA;min-height:100vh}\
         main{flex:1;padding:16px}\
         .grid{display:grid;grid-template-columns:1fr 1fr;gap:12px}\
         .wide{margin-top:12px}\
         .cell svg{max-width:100%;height:auto}\
         .notice{padding:24px;font-style:italic}\
         table{border-collapse:collapse;width:100%;font-size:12px}\
         th,td{border:1px solid #D3C0A7;padding:3px 5px;text-align:left}\
         </style></head><body>",
    );
}

fn sidebar(
    page: &mut String,
    settings: &DashboardSettings,
    selected_type: &CoffeeTypeFilter,
    selected_date: &str,
    today: NaiveDate,
    window: &[Order],
) {
    page.push_str("<aside>");
    page.push_str(&format!("<h2>{}</h2>", escape(&settings.title)));
    page.push_str(&format!("<h3>{}</h3>", escape(&settings.subtitle)));
    page.push_str(&format!("<p>{}</p>", escape(&settings.blurb)));

    page.push_str("<h3>Filter Options</h3>");
    page.push_str("<form method=\"get\" action=\"/\">");
    page.push_str("<label for=\"coffee_type\">Select Coffee Type</label><br>");
    page.push_str("<select id=\"coffee_type\" name=\"coffee_type\">");
    let selected_name = selected_type.to_string();
    for option in std::iter::once(ALL_TYPES.to_string()).chain(settings.type_options.iter().cloned())
    {
        let marker = if option == selected_name {
            " selected"
        } else {
            ""
        };
        page.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>",
            escape(&option),
            marker
        ));
    }
    page.push_str("</select><br>");
    page.push_str("<label for=\"start_date\">Select Date Range</label><br>");
    page.push_str(&format!(
        "<input type=\"date\" id=\"start_date\" name=\"start_date\" min=\"{DATE_MIN}\" max=\"{}\" value=\"{}\"><br>",
        today.format("%Y-%m-%d"),
        escape(selected_date)
    ));
    page.push_str("<button type=\"submit\">Apply</button></form>");

    page.push_str("<h3>Recent Orders</h3>");
    if window.is_empty() {
        page.push_str("<p class=\"notice\">No orders in the selected window.</p>");
    } else {
        page.push_str(
            "<table><tr><th>Order</th><th>User</th><th>Type</th><th>Qty</th><th>Price</th><th>Status</th></tr>",
        );
        for o in window {
            page.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td></tr>",
                o.order_id,
                o.user_id,
                escape(&o.coffee_type),
                o.quantity,
                o.total_price,
                escape(&o.status)
            ));
        }
        page.push_str("</table>");
    }
    page.push_str("</aside>");
}

fn chart_cell(page: &mut String, chart: &Option<String>) {
    page.push_str("<div class=\"cell\">");
    match chart {
        Some(svg) => page.push_str(svg),
        None => page.push_str("<p class=\"notice\">No data available for this chart.</p>"),
    }
    page.push_str("</div>");
}
