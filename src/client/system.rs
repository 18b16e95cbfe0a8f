use super::{HyperionClient, Result};
use crate::query_helpers::{ProposalsQuery, ScheduleQuery, VotersQuery};
use crate::types::*;

/// Governance state: voters, msig proposals and producer schedules.
#[derive(Clone, Copy, Debug)]
pub struct SystemApi<'a> {
    client: &'a HyperionClient,
}

impl<'a> SystemApi<'a> {
    pub(super) fn new(client: &'a HyperionClient) -> Self {
        Self { client }
    }

    pub async fn get_voters(&self, query: &VotersQuery) -> Result<GetVotersResponse> {
        self.client
            .get("/v2/state/get_voters", query.to_query())
            .await
    }

    pub async fn get_proposals(&self, query: &ProposalsQuery) -> Result<GetProposalsResponse> {
        self.client
            .get("/v2/state/get_proposals", query.to_query())
            .await
    }

    /// Returns the producer schedule active for the given bounds, or the
    /// current one when the query is empty.
    pub async fn get_schedule(&self, query: &ScheduleQuery) -> Result<Schedule> {
        self.client
            .get("/v2/history/get_schedule", query.to_query())
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::query_helpers::{Page, ProposalsQuery, ScheduleQuery, VotersQuery};
    use crate::transport::testing::StubTransport;
    use crate::HyperionClient;
    use std::sync::Arc;

    fn client(stub: &Arc<StubTransport>) -> HyperionClient {
        HyperionClient::with_shared_transport("https://hyperion.test", stub.clone())
    }

    fn pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn voters_for_producer() {
        let stub = Arc::new(StubTransport::always(
            200,
            r#"{"voters": [{"account": "alice", "weight": 1.5e16, "last_vote": "360000000"}]}"#,
        ));
        let query = VotersQuery {
            page: Page::limit(10),
            ..VotersQuery::for_producer("bp1")
        };
        let voters = client(&stub)
            .system()
            .get_voters(&query)
            .await
            .expect("request");
        assert_eq!(voters.voters[0].account, "alice");
        assert_eq!(voters.voters[0].last_vote, 360_000_000);

        let request = stub.last_request();
        assert_eq!(request.url, "https://hyperion.test/v2/state/get_voters");
        assert_eq!(request.query, pairs(&[("producer", "bp1"), ("limit", "10")]));
    }

    #[tokio::test]
    async fn proposals_with_pending_approvals() {
        let stub = Arc::new(StubTransport::always(
            200,
            r#"{"proposals": [{
                "proposal_name": "upgrade",
                "proposer": "alice",
                "executed": false,
                "requested_approvals": [{"actor": "bp1", "permission": "active"}, {"actor": "bp2", "permission": "active"}],
                "provided_approvals": [{"actor": "bp1", "permission": "active", "time": "2024-01-01T00:00:00"}]
            }]}"#,
        ));
        let query = ProposalsQuery {
            executed: Some(false),
            ..ProposalsQuery::by_proposer("alice")
        };
        let proposals = client(&stub)
            .system()
            .get_proposals(&query)
            .await
            .expect("request");
        let pending: Vec<_> = proposals.proposals[0]
            .pending_approvals()
            .map(|a| a.actor.as_str())
            .collect();
        assert_eq!(pending, ["bp2"]);
        assert_eq!(
            stub.last_request().query,
            pairs(&[("proposer", "alice"), ("executed", "false")])
        );
    }

    #[tokio::test]
    async fn current_schedule() {
        let stub = Arc::new(StubTransport::always(
            200,
            r#"{"timestamp": "2024-01-01T00:00:00", "block_num": 1000, "version": 7, "producers": [{"name": "bp1"}, {"producer_name": "bp2"}]}"#,
        ));
        let schedule = client(&stub)
            .system()
            .get_schedule(&ScheduleQuery::default())
            .await
            .expect("request");
        assert_eq!(schedule.version, 7);
        assert!(schedule.contains("bp1"));
        assert!(schedule.contains("bp2"));
        assert!(!schedule.contains("bp3"));

        let request = stub.last_request();
        assert_eq!(request.url, "https://hyperion.test/v2/history/get_schedule");
        assert!(request.query.is_empty());
    }
}
