use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::PinotConfig;
use crate::error::{AppError, AppResult};
use crate::models::Order;

/// The one query the dashboard issues per page load.
pub const ORDERS_QUERY: &str = "SELECT ORDERID, USERID, ORDER_TIMESTAMP, COFFEE_TYPES, QUANTITY, TOTAL_PRICE, STATUS FROM COFFEECITY";

#[derive(Debug, Deserialize)]
pub struct BrokerResponse {
    #[serde(rename = "resultTable")]
    pub result_table: Option<ResultTable>,
    #[serde(default)]
    pub exceptions: Vec<BrokerException>,
}

#[derive(Debug, Deserialize)]
pub struct ResultTable {
    #[serde(rename = "dataSchema")]
    pub data_schema: DataSchema,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct DataSchema {
    #[serde(rename = "columnNames")]
    pub column_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BrokerException {
    #[serde(rename = "errorCode")]
    pub error_code: i32,
    pub message: String,
}

/// HTTP client for the Pinot broker's SQL endpoint.
#[derive(Debug, Clone)]
pub struct PinotClient {
    client: Client,
    query_url: String,
}

impl PinotClient {
    pub fn new(config: &PinotConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        let query_url = format!(
            "{}://{}:{}{}",
            config.scheme, config.host, config.port, config.path
        );
        Ok(Self { client, query_url })
    }

    pub async fn query_sql(&self, sql: &str) -> AppResult<BrokerResponse> {
        let response = self
            .client
            .post(&self.query_url)
            .json(&serde_json::json!({ "sql": sql }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::PinotError(format!(
                "broker returned HTTP {status}"
            )));
        }

        let body: BrokerResponse = response.json().await?;
        if let Some(exception) = body.exceptions.first() {
            return Err(AppError::PinotError(format!(
                "broker exception {}: {}",
                exception.error_code, exception.message
            )));
        }
        Ok(body)
    }

    /// Runs the fixed COFFEECITY query and converts the result table.
    pub async fn fetch_orders(&self) -> AppResult<Vec<Order>> {
        let response = self.query_sql(ORDERS_QUERY).await?;
        let (orders, skipped) = orders_from_response(response)?;
        if skipped > 0 {
            log::warn!("Skipped {skipped} order rows with unparseable timestamps");
        }
        log::info!("Fetched {} orders from Pinot", orders.len());
        Ok(orders)
    }
}

/// Converts a broker response into orders, resolving columns by name.
/// Rows whose timestamp cell does not parse are dropped and counted.
pub fn orders_from_response(response: BrokerResponse) -> AppResult<(Vec<Order>, usize)> {
    let table = match response.result_table {
        Some(t) => t,
        None => return Ok((Vec::new(), 0)),
    };

    let col = |name: &str| -> AppResult<usize> {
        table
            .data_schema
            .column_names
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| AppError::PinotError(format!("column {name} missing from result")))
    };

    let order_id = col("ORDERID")?;
    let user_id = col("USERID")?;
    let timestamp = col("ORDER_TIMESTAMP")?;
    let coffee_type = col("COFFEE_TYPES")?;
    let quantity = col("QUANTITY")?;
    let total_price = col("TOTAL_PRICE")?;
    let status = col("STATUS")?;

    let mut orders = Vec::with_capacity(table.rows.len());
    let mut skipped = 0usize;
    for row in &table.rows {
        let ts = match row.get(timestamp).and_then(parse_timestamp) {
            Some(ts) => ts,
            None => {
                skipped += 1;
                continue;
            }
        };
        orders.push(Order {
            order_id: row.get(order_id).and_then(cell_i64).unwrap_or_default(),
            user_id: row.get(user_id).and_then(cell_i64).unwrap_or_default(),
            order_timestamp: ts,
            coffee_type: row
                .get(coffee_type)
                .and_then(cell_string)
                .unwrap_or_default(),
            quantity: row
                .get(quantity)
                .and_then(cell_i64)
                .and_then(|q| u32::try_from(q).ok())
                .unwrap_or_default(),
            total_price: row.get(total_price).and_then(cell_f64).unwrap_or_default(),
            status: row.get(status).and_then(cell_string).unwrap_or_default(),
        });
    }
    Ok((orders, skipped))
}

/// Pinot timestamps arrive as epoch millis or as datetime strings
/// depending on the column type.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| DateTime::from_timestamp_millis(millis)),
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                    return Some(naive.and_utc());
                }
            }
            None
        }
        _ => None,
    }
}

fn cell_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn cell_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn cell_string(value: &Value) -> Option<String> {
    value.as_str().map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn broker_fixture(rows: &str) -> BrokerResponse {
        let raw = format!(
            r#"{{
                "resultTable": {{
                    "dataSchema": {{
                        "columnNames": ["ORDERID", "USERID", "ORDER_TIMESTAMP", "COFFEE_TYPES", "QUANTITY", "TOTAL_PRICE", "STATUS"],
                        "columnDataTypes": ["LONG", "LONG", "TIMESTAMP", "STRING", "INT", "DOUBLE", "STRING"]
                    }},
                    "rows": {rows}
                }},
                "exceptions": []
            }}"#
        );
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_orders_from_response() {
        let response = broker_fixture(
            r#"[
                [101, 7, "2024-05-10 09:30:00", "Latte", 2, 8.5, "Completed"],
                [102, 9, 1715333400000, "Espresso", 1, 3.0, "Pending"]
            ]"#,
        );
        let (orders, skipped) = orders_from_response(response).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_id, 101);
        assert_eq!(orders[0].coffee_type, "Latte");
        assert_eq!(orders[0].quantity, 2);
        assert_eq!(
            orders[0].order_timestamp,
            Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
        );
        assert_eq!(orders[1].status, "Pending");
        assert_eq!(
            orders[1].order_timestamp,
            DateTime::from_timestamp_millis(1715333400000).unwrap()
        );
    }

    #[test]
    fn test_malformed_timestamp_rows_are_skipped() {
        let response = broker_fixture(
            r#"[
                [101, 7, "not a timestamp", "Latte", 2, 8.5, "Completed"],
                [102, 9, "2024-05-10 10:00:00", "Espresso", 1, 3.0, "Pending"]
            ]"#,
        );
        let (orders, skipped) = orders_from_response(response).unwrap();
        assert_eq!(skipped, 1);
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, 102);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let raw = r#"{
            "resultTable": {
                "dataSchema": { "columnNames": ["ORDERID"], "columnDataTypes": ["LONG"] },
                "rows": [[1]]
            }
        }"#;
        let response: BrokerResponse = serde_json::from_str(raw).unwrap();
        assert!(orders_from_response(response).is_err());
    }

    #[test]
    fn test_empty_result_table() {
        let raw = r#"{ "exceptions": [] }"#;
        let response: BrokerResponse = serde_json::from_str(raw).unwrap();
        let (orders, skipped) = orders_from_response(response).unwrap();
        assert!(orders.is_empty());
        assert_eq!(skipped, 0);
    }
}
