use super::{HyperionClient, Result};
use crate::query_helpers::{ActionsQuery, LinksQuery, Page, Query};
use crate::types::*;

/// Account lookups: state, creator, keys, links, tokens and action history.
#[derive(Clone, Copy, Debug)]
pub struct AccountsApi<'a> {
    client: &'a HyperionClient,
}

impl<'a> AccountsApi<'a> {
    pub(super) fn new(client: &'a HyperionClient) -> Self {
        Self { client }
    }

    /// Returns the account with its links, tokens and latest actions, or
    /// `None` when the indexer has no such account.
    pub async fn get_account(&self, account: &str) -> Result<Option<GetAccountResponse>> {
        let query = Query::new().with("account", account).into_pairs();
        self.client.get_optional("/v2/state/get_account", query).await
    }

    /// Returns who created `account`, or `None` when it is unknown.
    pub async fn get_creator(&self, account: &str) -> Result<Option<GetCreatorResponse>> {
        let query = Query::new().with("account", account).into_pairs();
        self.client
            .get_optional("/v2/history/get_creator", query)
            .await
    }

    /// Returns the accounts created by `account`.
    pub async fn get_created_accounts(
        &self,
        account: &str,
        page: Page,
    ) -> Result<GetCreatedAccountsResponse> {
        let query = page.apply(Query::new().with("account", account)).into_pairs();
        self.client
            .get("/v2/history/get_created_accounts", query)
            .await
    }

    /// Returns the accounts controlled by a public key.
    pub async fn get_key_accounts(&self, public_key: &str) -> Result<AccountNames> {
        let query = Query::new().with("public_key", public_key).into_pairs();
        self.client.get("/v2/state/get_key_accounts", query).await
    }

    /// Returns permission links.
    pub async fn get_links(&self, query: &LinksQuery) -> Result<GetLinksResponse> {
        self.client
            .get("/v2/state/get_links", query.to_query())
            .await
    }

    /// Returns the token balances of `account`.
    pub async fn get_tokens(&self, account: &str, page: Page) -> Result<GetTokensResponse> {
        let query = page.apply(Query::new().with("account", account)).into_pairs();
        self.client.get("/v2/state/get_tokens", query).await
    }

    /// Returns indexed actions.
    pub async fn get_actions(&self, query: &ActionsQuery) -> Result<GetActionsResponse> {
        self.client
            .get("/v2/history/get_actions", query.to_query())
            .await
    }
}
