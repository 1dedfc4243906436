use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

use crate::app::store::{CommentWriter, ContentReader};
use crate::config::AppConfig;
use crate::domain::comment::{Comment, CommentDraft};
use crate::domain::post::{Post, PostSummary};

const POST_COUNT_QUERY: &str = "count(*[_id == $postId])";

const LIST_POSTS_QUERY: &str = "*[_type == \"post\"] | order(publishedAt desc) \
    { \"id\": _id, title, \"slug\": slug.current, \"main_image\": mainImage, \
    \"published_at\": publishedAt }";

const POST_BY_SLUG_QUERY: &str = "*[_type == \"post\" && slug.current == $slug][0]\
    { \"id\": _id, title, \"slug\": slug.current, \"main_image\": mainImage, \
    \"published_at\": publishedAt, body }";

const APPROVED_COMMENTS_QUERY: &str = "*[_type == \"comment\" && approved == true \
    && post._ref == $postId]{ \"id\": _id, name, comment, \
    \"created_at\": _createdAt } | order(created_at asc)";

const PING_QUERY: &str = "count(*[_id == \"__ping__\"])";

/// Query responses arrive wrapped in an envelope; only `result` matters.
#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Anonymous read client. Queries go to the store's CDN host when
/// `cms_use_cdn` is set, so responses may be edge-cached.
#[derive(Clone)]
pub struct CmsReadClient {
    http: reqwest::Client,
    query_url: Url,
}

impl CmsReadClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.cms_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            query_url: query_endpoint(config, config.cms_use_cdn)?,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let mut url = self.query_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            for (name, value) in params {
                // GROQ parameters are passed JSON-encoded under a `$` key.
                let encoded = serde_json::to_string(value)?;
                pairs.append_pair(&format!("${}", name), &encoded);
            }
        }

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("content store query failed: {} {}", status, body));
        }

        let envelope: QueryResponse<T> = response.json().await?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl ContentReader for CmsReadClient {
    async fn post_count(&self, post_id: &str) -> Result<u64> {
        self.fetch(POST_COUNT_QUERY, &[("postId", post_id)]).await
    }

    async fn list_posts(&self) -> Result<Vec<PostSummary>> {
        self.fetch(LIST_POSTS_QUERY, &[]).await
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        self.fetch(POST_BY_SLUG_QUERY, &[("slug", slug)]).await
    }

    async fn approved_comments(&self, post_id: &str) -> Result<Vec<Comment>> {
        self.fetch(APPROVED_COMMENTS_QUERY, &[("postId", post_id)])
            .await
    }

    async fn ping(&self) -> Result<()> {
        let _count: u64 = self.fetch(PING_QUERY, &[]).await?;
        Ok(())
    }
}

/// Token-bearing write client. Mutations always go to the live API host;
/// the CDN does not accept writes.
#[derive(Clone)]
pub struct CmsWriteClient {
    http: reqwest::Client,
    mutate_url: Url,
    token: String,
}

impl CmsWriteClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.cms_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            mutate_url: mutate_endpoint(config)?,
            token: config.cms_write_token.clone(),
        })
    }
}

#[async_trait]
impl CommentWriter for CmsWriteClient {
    async fn create_unapproved(&self, draft: &CommentDraft) -> Result<()> {
        // `approved` is set here and nowhere else; the submission path has
        // no way to express an approved comment.
        let body = json!({
            "mutations": [{
                "create": {
                    "_type": "comment",
                    "post": { "_type": "reference", "_ref": draft.post_id },
                    "name": draft.name,
                    "comment": draft.comment,
                    "approved": false,
                }
            }]
        });

        let response = self
            .http
            .post(self.mutate_url.clone())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "content store mutation failed: {} {}",
                status,
                body
            ));
        }

        Ok(())
    }
}

fn query_endpoint(config: &AppConfig, use_cdn: bool) -> Result<Url> {
    let host = if use_cdn { "apicdn.sanity.io" } else { "api.sanity.io" };
    let url = format!(
        "https://{}.{}/v{}/data/query/{}",
        config.cms_project_id, host, config.cms_api_version, config.cms_dataset
    );
    Url::parse(&url).map_err(|err| anyhow!("invalid content store query url: {}", err))
}

fn mutate_endpoint(config: &AppConfig) -> Result<Url> {
    let url = format!(
        "https://{}.api.sanity.io/v{}/data/mutate/{}",
        config.cms_project_id, config.cms_api_version, config.cms_dataset
    );
    Url::parse(&url).map_err(|err| anyhow!("invalid content store mutate url: {}", err))
}
