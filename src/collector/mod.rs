//! Hadoop JMX collection module
//!
//! Fetches the JSON document served by the `/jmx` servlet of Hadoop-family
//! daemons and parses it into bean records.
//!
//! # Example
//!
//! ```ignore
//! use hadoop_jmx_exporter::collector::JmxClient;
//!
//! let client = JmxClient::new(5000)?;
//! let beans = client.fetch_beans("http://regionserver:16030/jmx").await?;
//! ```

mod client;
mod parser;

pub use client::{parse_target, JmxClient, RetryConfig};
pub use parser::{
    parse_jmx_response, AttributeValue, BeanRecord, CollectResult, IDENTITY_ATTRIBUTE,
};
