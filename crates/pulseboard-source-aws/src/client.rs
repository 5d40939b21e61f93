use aws_config::{
    BehaviorVersion,
    Region,
};

/// Cost Explorer only serves requests from this region
const COST_EXPLORER_REGION: &str = "us-east-1";

/// SDK clients shared by every AWS source
#[derive(Clone)]
pub struct AwsClients {
    pub cloudwatch: aws_sdk_cloudwatch::Client,
    pub dynamodb: aws_sdk_dynamodb::Client,
    pub cost_explorer: aws_sdk_costexplorer::Client,
}

impl AwsClients {
    /// Loads credentials from the default provider chain.
    pub async fn load(region: &str, profile: Option<&str>) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        tracing::debug!(region, profile = ?profile, "Loaded AWS configuration");

        let cost_config = aws_sdk_costexplorer::config::Builder::from(&sdk_config)
            .region(aws_sdk_costexplorer::config::Region::new(COST_EXPLORER_REGION))
            .build();

        Self {
            cloudwatch: aws_sdk_cloudwatch::Client::new(&sdk_config),
            dynamodb: aws_sdk_dynamodb::Client::new(&sdk_config),
            cost_explorer: aws_sdk_costexplorer::Client::from_conf(cost_config),
        }
    }
}
