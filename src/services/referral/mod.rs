//! Referral program service
//!
//! Fetches the downline tree, exposes aggregate team figures, and computes
//! the account's tier standing from the configured tier table.

pub mod team;

pub use team::{LevelSummary, TeamMember, TeamSnapshot};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

use crate::config::models::ReferralConfig;
use crate::core::result::AppResult;
use crate::core::tier::{TierStanding, TierTable};
use crate::core::types::WalletBalance;
use crate::infrastructure::storage::SessionContext;
use crate::services::api::types::{
    ShowDetailsRequest, TeamAggregateResponse, TeamDetailsRequest, TeamDetailsResponse,
};
use crate::services::api::ApiClient;

/// Aggregate team figures as computed by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamAggregate {
    /// Total downline member count across all depths
    pub total_members: u32,
    /// Sum of downline wallet balances
    pub total_wallet: Decimal,
    /// Count of direct referrals
    pub direct_members: u32,
}

impl From<TeamAggregateResponse> for TeamAggregate {
    fn from(dto: TeamAggregateResponse) -> Self {
        Self {
            total_members: dto.total_members,
            total_wallet: dto.total_wallet,
            direct_members: dto.direct_members,
        }
    }
}

/// Referral program operations service
#[derive(Debug, Clone)]
pub struct ReferralService {
    api: Arc<ApiClient>,
    session: Arc<SessionContext>,
    tiers: TierTable,
    team_depth: u8,
}

impl ReferralService {
    /// Create the service, validating the configured tier table
    pub fn new(
        api: Arc<ApiClient>,
        session: Arc<SessionContext>,
        config: &ReferralConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            api,
            session,
            tiers: TierTable::new(config.tiers.clone())?,
            team_depth: config.team_depth,
        })
    }

    /// The validated tier table in use
    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Fetch the downline snapshot for the logged-in account
    #[instrument(skip(self))]
    pub async fn team_snapshot(&self) -> AppResult<TeamSnapshot> {
        let username = self.session.username().await?;

        let request = TeamDetailsRequest {
            username: username.into_inner(),
        };
        let response: TeamDetailsResponse = self
            .api
            .post_authorized("/total-teams-details", &request)
            .await?;

        Ok(TeamSnapshot::from_wire(response.teams, self.team_depth))
    }

    /// Fetch backend-computed team aggregates for the logged-in account
    #[instrument(skip(self))]
    pub async fn aggregate(&self) -> AppResult<TeamAggregate> {
        let username = self.session.username().await?;

        let request = ShowDetailsRequest {
            username: username.into_inner(),
        };
        let response: TeamAggregateResponse =
            self.api.post_authorized("/showDetails", &request).await?;

        Ok(response.into())
    }

    /// Compute the tier standing for a wallet balance and downline count
    pub fn standing_for(
        &self,
        wallet: WalletBalance,
        downline_count: u32,
    ) -> AppResult<TierStanding> {
        self.tiers.standing(wallet.value(), downline_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::ApiConfig;
    use crate::core::types::{AuthToken, Username};
    use crate::infrastructure::storage::TokenStore;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn service(server: &MockServer, dir: &tempfile::TempDir) -> ReferralService {
        let session = SessionContext::open(TokenStore::new(dir.path().join("session.json")))
            .await
            .unwrap();
        session
            .establish(
                AuthToken::new("tok".to_string()),
                Username::new_unchecked("alice".to_string()),
            )
            .await
            .unwrap();

        let config = ApiConfig {
            base_url: server.uri(),
            request_timeout_ms: 5000,
            connection_timeout_ms: 5000,
            max_retries: 0,
            retry_backoff_ms: 1,
        };
        let api = Arc::new(ApiClient::new(&config, session.clone()).unwrap());
        ReferralService::new(api, session, &ReferralConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_team_snapshot_fetch_and_aggregate() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let referral = service(&server, &dir).await;

        Mock::given(method("POST"))
            .and(path("/total-teams-details"))
            .and(body_json(serde_json::json!({"username": "alice"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "teams": {
                    "level1": [
                        {"username": "bob", "wallet": 120.5},
                        {"username": "carol", "wallet": 80}
                    ],
                    "level2": [{"username": "dan", "wallet": 10}]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = referral.team_snapshot().await.unwrap();
        assert_eq!(snapshot.total_members(), 3);
        assert_eq!(snapshot.total_wallet(), dec!(210.5));
    }

    #[tokio::test]
    async fn test_aggregate_fetch() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let referral = service(&server, &dir).await;

        Mock::given(method("POST"))
            .and(path("/showDetails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "totalMembers": 42,
                "totalWallet": 1234.56,
                "directMembers": 7
            })))
            .mount(&server)
            .await;

        let aggregate = referral.aggregate().await.unwrap();
        assert_eq!(aggregate.total_members, 42);
        assert_eq!(aggregate.total_wallet, dec!(1234.56));
        assert_eq!(aggregate.direct_members, 7);
    }

    #[tokio::test]
    async fn test_standing_uses_configured_table() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let referral = service(&server, &dir).await;

        let standing = referral
            .standing_for(WalletBalance::new(dec!(500)).unwrap(), 6)
            .unwrap();
        assert_eq!(standing.current.level, 2);
        assert_eq!(standing.next.as_ref().unwrap().level, 3);
    }
}
