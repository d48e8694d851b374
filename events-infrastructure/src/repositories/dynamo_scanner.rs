use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue as WireValue;
use aws_sdk_dynamodb::Client;
use tracing::{debug, warn};

use events_domain::ports::TableScanner;
use events_domain::{AttributeMap, AttributeValue, ContinuationToken, ScanPage, ScanRequest, StoreConfig};

/// Opens a client handle. No request is made until the first scan.
pub async fn connect(config: &StoreConfig) -> Client {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
    if let Some(endpoint_url) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint_url.as_str());
    }
    if let Some(credentials) = &config.credentials {
        loader = loader.credentials_provider(Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            credentials.session_token.clone(),
            None,
            "events-config",
        ));
    }
    debug!(
        region = %config.region,
        endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
        "connecting to table store"
    );
    Client::new(&loader.load().await)
}

#[derive(Debug, Clone)]
pub struct DynamoTableScanner {
    client: Client,
}

impl DynamoTableScanner {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableScanner for DynamoTableScanner {
    async fn scan_page(
        &self,
        request: &ScanRequest,
        start: Option<ContinuationToken>,
    ) -> anyhow::Result<ScanPage> {
        let expression = &request.expression;
        let mut scan = self
            .client
            .scan()
            .table_name(&request.table_name)
            .set_filter_expression(expression.filter_text().map(str::to_string))
            .set_projection_expression(expression.projection_text().map(str::to_string))
            .set_limit(
                request
                    .page_size
                    .map(|size| i32::try_from(size).unwrap_or(i32::MAX)),
            )
            .set_exclusive_start_key(start.map(|token| to_wire_map(token.into_key())));
        if !expression.names().is_empty() {
            scan = scan.set_expression_attribute_names(Some(expression.names().clone()));
        }
        if !expression.values().is_empty() {
            scan = scan.set_expression_attribute_values(Some(to_wire_map(
                expression.values().clone(),
            )));
        }

        let output = scan.send().await.map_err(|err| {
            anyhow!(
                "scan of table {} failed: {}",
                request.table_name,
                DisplayErrorContext(&err)
            )
        })?;

        let items = output.items().iter().map(from_wire_map).collect();
        let next = output
            .last_evaluated_key()
            .filter(|key| !key.is_empty())
            .map(|key| ContinuationToken::new(from_wire_map(key)));

        Ok(ScanPage { items, next })
    }
}

fn to_wire_map(map: AttributeMap) -> HashMap<String, WireValue> {
    map.into_iter()
        .filter_map(|(name, value)| to_wire(value).map(|value| (name, value)))
        .collect()
}

/// `None` for values read from an unsupported wire type; they never go back out.
fn to_wire(value: AttributeValue) -> Option<WireValue> {
    let wire = match value {
        AttributeValue::S(text) => WireValue::S(text),
        AttributeValue::N(number) => WireValue::N(number),
        AttributeValue::B(bytes) => WireValue::B(Blob::new(bytes)),
        AttributeValue::Bool(flag) => WireValue::Bool(flag),
        AttributeValue::Null => WireValue::Null(true),
        AttributeValue::Ss(set) => WireValue::Ss(set),
        AttributeValue::Ns(set) => WireValue::Ns(set),
        AttributeValue::Bs(set) => WireValue::Bs(set.into_iter().map(Blob::new).collect()),
        AttributeValue::L(items) => WireValue::L(items.into_iter().filter_map(to_wire).collect()),
        AttributeValue::M(map) => WireValue::M(to_wire_map(map)),
        AttributeValue::Unsupported => return None,
    };
    Some(wire)
}

fn from_wire_map(map: &HashMap<String, WireValue>) -> AttributeMap {
    map.iter()
        .map(|(name, value)| (name.clone(), from_wire(name, value)))
        .collect()
}

fn from_wire(name: &str, value: &WireValue) -> AttributeValue {
    match value {
        WireValue::S(text) => AttributeValue::S(text.clone()),
        WireValue::N(number) => AttributeValue::N(number.clone()),
        WireValue::B(blob) => AttributeValue::B(blob.as_ref().to_vec()),
        WireValue::Bool(flag) => AttributeValue::Bool(*flag),
        WireValue::Null(_) => AttributeValue::Null,
        WireValue::Ss(set) => AttributeValue::Ss(set.clone()),
        WireValue::Ns(set) => AttributeValue::Ns(set.clone()),
        WireValue::Bs(set) => {
            AttributeValue::Bs(set.iter().map(|blob| blob.as_ref().to_vec()).collect())
        }
        WireValue::L(items) => {
            AttributeValue::L(items.iter().map(|item| from_wire(name, item)).collect())
        }
        WireValue::M(map) => AttributeValue::M(from_wire_map(map)),
        _ => {
            warn!(attribute = name, "attribute has an unsupported wire type");
            AttributeValue::Unsupported
        }
    }
}
