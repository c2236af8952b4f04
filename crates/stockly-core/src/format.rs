// ── Display formatting ──
//
// Formatting rules shared by every view: currency, grouped numbers,
// locale dates, capacity bands, and list footers. The "locale" of a
// terminal client is the process-local UTC offset.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use stockly_api::types::Pagination;

use crate::status::StatusColor;

pub const DATE_FORMAT: &str = "%m/%d/%Y";
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";

/// Placeholder for missing values.
pub const DASH: &str = "-";

// ── Numbers ──────────────────────────────────────────────────────────

/// `$12.50`
pub fn currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}

/// `$1,234,567` for aggregates; cents appear only when non-zero.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
pub fn currency_grouped(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents_total = (amount.abs() * 100.0).round() as i64;
    let (whole, cents) = (cents_total / 100, cents_total % 100);
    if cents == 0 {
        format!("{sign}${}", grouped(whole))
    } else {
        format!("{sign}${}.{cents:02}", grouped(whole))
    }
}

/// `12,345`
pub fn grouped(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── Dates ────────────────────────────────────────────────────────────

/// Date-only rendering in the viewer's local time zone.
pub fn date(dt: DateTime<Utc>) -> String {
    date_in(dt, &Local)
}

/// Date-and-time rendering in the viewer's local time zone.
pub fn timestamp(dt: DateTime<Utc>) -> String {
    timestamp_in(dt, &Local)
}

pub fn date_in<Tz: TimeZone>(dt: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.with_timezone(tz).format(DATE_FORMAT).to_string()
}

pub fn timestamp_in<Tz: TimeZone>(dt: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

pub fn optional_date(dt: Option<DateTime<Utc>>) -> String {
    dt.map_or_else(|| DASH.to_owned(), date)
}

pub fn optional_timestamp(dt: Option<DateTime<Utc>>) -> String {
    dt.map_or_else(|| DASH.to_owned(), timestamp)
}

/// The value itself, or `-` when missing or blank.
pub fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DASH)
        .to_owned()
}

// ── Bands & summaries ────────────────────────────────────────────────

/// Capacity utilization color: above 90% red, above 70% yellow.
pub fn utilization_band(pct: f64) -> StatusColor {
    if pct > 90.0 {
        StatusColor::Red
    } else if pct > 70.0 {
        StatusColor::Yellow
    } else {
        StatusColor::Green
    }
}

/// Alert line for the stock levels screen; `None` when nothing is short.
pub fn stock_alert_summary(critical: usize, low: usize) -> Option<String> {
    (critical > 0 || low > 0).then(|| format!("{critical} critical, {low} low stock items"))
}

/// Footer lines for a paginated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFooter {
    /// `Showing 21 to 40 of 57 results`
    pub showing: String,
    /// `Page 2 of 3`
    pub page: String,
}

pub fn pagination_footer(p: &Pagination) -> PageFooter {
    let page = u64::from(p.page.max(1));
    let limit = u64::from(p.limit);
    let (first, last) = if p.total == 0 {
        (0, 0)
    } else {
        ((page - 1) * limit + 1, (page * limit).min(p.total))
    };
    PageFooter {
        showing: format!("Showing {first} to {last} of {} results", p.total),
        page: format!("Page {} of {}", p.page, p.total_pages),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn currency_has_two_decimals() {
        assert_eq!(currency(12.5), "$12.50");
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency(-3.256), "-$3.26");
    }

    #[test]
    fn grouped_currency_for_aggregates() {
        assert_eq!(currency_grouped(1_234_567.0), "$1,234,567");
        assert_eq!(currency_grouped(1_234.5), "$1,234.50");
        assert_eq!(currency_grouped(0.0), "$0");
        assert_eq!(grouped(-12_345), "-12,345");
        assert_eq!(grouped(999), "999");
    }

    #[test]
    fn dates_follow_the_given_zone() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 2, 5, 9).unwrap();
        assert_eq!(date_in(dt, &Utc), "03/01/2024");
        assert_eq!(timestamp_in(dt, &Utc), "03/01/2024, 02:05:09 AM");

        // West of UTC the same instant is still the previous day.
        let pacific = FixedOffset::west_opt(8 * 3600).unwrap();
        assert_eq!(date_in(dt, &pacific), "02/29/2024");
    }

    #[test]
    fn utilization_bands() {
        assert_eq!(utilization_band(95.0), StatusColor::Red);
        assert_eq!(utilization_band(90.0), StatusColor::Yellow);
        assert_eq!(utilization_band(75.0), StatusColor::Yellow);
        assert_eq!(utilization_band(70.0), StatusColor::Green);
        assert_eq!(utilization_band(50.0), StatusColor::Green);
    }

    #[test]
    fn alert_summary_only_when_short() {
        assert_eq!(stock_alert_summary(0, 0), None);
        assert_eq!(
            stock_alert_summary(2, 5).as_deref(),
            Some("2 critical, 5 low stock items")
        );
    }

    #[test]
    fn footer_clamps_last_page() {
        let footer = pagination_footer(&Pagination {
            page: 3,
            limit: 20,
            total: 57,
            total_pages: 3,
        });
        assert_eq!(footer.showing, "Showing 41 to 57 of 57 results");
        assert_eq!(footer.page, "Page 3 of 3");
    }

    #[test]
    fn missing_values_render_as_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(Some("Aisle 4")), "Aisle 4");
    }
}
