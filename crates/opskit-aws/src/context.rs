use aws_config::{BehaviorVersion, Region, SdkConfig};
use opskit_core::Settings;

/// Shared SDK configuration, resolved once per invocation.
///
/// Region and profile come from the CLI flags when given, otherwise from the
/// standard `AWS_REGION` / `AWS_PROFILE` environment and `~/.aws/config`
/// chain the SDK already implements.
pub struct AwsContext {
    config: SdkConfig,
}

impl AwsContext {
    pub async fn load(settings: &Settings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        tracing::debug!(
            region = settings.region.as_deref(),
            profile = settings.profile.as_deref(),
            "resolving AWS configuration"
        );
        AwsContext {
            config: loader.load().await,
        }
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn region(&self) -> Option<&str> {
        self.config.region().map(|r| r.as_ref())
    }
}
