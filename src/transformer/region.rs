//! HBase region-server attribute key decoder
//!
//! Region-server beans encode table identifiers inside attribute keys:
//!
//! ```text
//! Namespace_default_table_usertable_region_5f3a9c_metric_storeCount
//! |-- header -----------| |- name -|        |- id -|       |- metric -|
//! ```
//!
//! The first three tokens are a fixed header. The table name runs up to the
//! last standalone `region` token and the table id from there to the
//! standalone `metric` token. Table names may contain `region` tokens
//! themselves, so every later `region` token moves the marker. Everything
//! after the first `_metric_` is the metric.

/// Substring that marks an encoded key
pub const METRIC_MARKER: &str = "_metric_";

/// Label carrying the decoded table name
pub const TABLE_NAME_LABEL: &str = "tableName";

/// Label carrying the decoded table id
pub const TABLE_ID_LABEL: &str = "tableId";

const REGION_TOKEN: &str = "region";
const METRIC_TOKEN: &str = "metric";

/// Number of header tokens preceding the table name
const HEADER_TOKENS: usize = 3;

/// A decoded region-server attribute key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionKey<'a> {
    /// Table name, when a `region` marker follows the header
    pub table_name: Option<String>,
    /// Table id, when a `metric` marker follows the `region` marker
    pub table_id: Option<String>,
    /// Key text after the first `_metric_`
    pub metric: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Inside the fixed header
    Scanning,
    /// Collecting table name tokens
    InTableName,
    /// Past a `region` marker; table id tokens start at `start`
    InTableId { start: usize },
    /// `metric` came before any `region` marker
    Done,
}

/// Decode a region-server attribute key
///
/// Returns `None` when the key carries no `_metric_` marker. Marker tokens
/// inside the header are ordinary text. After the header, each `region`
/// token records the table name and becomes the marker position, and each
/// `metric` token records the table id since that marker. A `metric` token
/// reached before any `region` token ends decoding with neither label set.
pub fn decode_region_key(key: &str) -> Option<RegionKey<'_>> {
    let marker = key.find(METRIC_MARKER)?;
    let metric = &key[marker + METRIC_MARKER.len()..];

    let tokens: Vec<&str> = key.split('_').collect();
    let mut table_name = None;
    let mut table_id = None;
    let mut state = DecodeState::Scanning;

    for (pos, token) in tokens.iter().enumerate() {
        state = match state {
            DecodeState::Scanning => {
                if pos + 1 >= HEADER_TOKENS {
                    DecodeState::InTableName
                } else {
                    DecodeState::Scanning
                }
            }
            DecodeState::InTableName => match *token {
                REGION_TOKEN => {
                    table_name = Some(tokens[HEADER_TOKENS..pos].join("_"));
                    DecodeState::InTableId { start: pos + 1 }
                }
                METRIC_TOKEN => DecodeState::Done,
                _ => DecodeState::InTableName,
            },
            DecodeState::InTableId { start } => match *token {
                REGION_TOKEN => {
                    table_name = Some(tokens[HEADER_TOKENS..pos].join("_"));
                    DecodeState::InTableId { start: pos + 1 }
                }
                METRIC_TOKEN => {
                    table_id = Some(tokens[start..pos].join("_"));
                    DecodeState::InTableId { start }
                }
                _ => DecodeState::InTableId { start },
            },
            DecodeState::Done => break,
        };
    }

    Some(RegionKey {
        table_name,
        table_id,
        metric,
    })
}
