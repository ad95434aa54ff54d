//! Thin client over the Blogger v3 posts endpoints.

pub mod schema;

use std::time::Duration;

use log::{debug, info};
use match_posts_utils::{
    credentials::{AccessToken, ApiKey, BlogId, Credentials},
    regex,
};
use reqwest::{header, Method, RequestBuilder, StatusCode};
use tokio::time::sleep;
use url::Url;

use crate::settings::Settings;

use self::schema::{DeleteOutcome, Post, PostId, PostList, PostUpdate};

#[derive(Debug, thiserror::Error)]
pub enum BloggerError {
    #[error("Server returned {status} for {method} {url}: {body}")]
    Status {
        method: Method,
        url: Url,
        status: StatusCode,
        body: String,
    },
    #[error("An access token is required to {0}")]
    MissingToken(&'static str),
    #[error("The API base URL cannot be extended with a path: {0}")]
    BadBase(Url),
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

pub struct BloggerClient {
    client: reqwest::Client,
    base: Url,
    blog_id: BlogId,
    api_key: ApiKey,
    access_token: Option<AccessToken>,
    page_size: usize,
    page_delay: Duration,
}

impl BloggerClient {
    pub fn new(credentials: Credentials, settings: &Settings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base: settings.api_base.clone(),
            blog_id: credentials.blog_id,
            api_key: credentials.api_key,
            access_token: credentials.access_token,
            page_size: settings.page_size.max(1),
            page_delay: settings.pacing.page(),
        })
    }

    pub fn blog_id(&self) -> &BlogId {
        &self.blog_id
    }

    /// Fetches up to `max` posts, newest first, following `nextPageToken`.
    pub async fn list_posts(&self, max: usize) -> Result<Vec<Post>, BloggerError> {
        info!("Fetching blog posts (max: {max})");
        let mut posts = vec![];
        let mut page_token: Option<String> = None;
        let mut page = 0;
        loop {
            page += 1;
            info!("Fetching page {page}...");
            let mut request = self
                .client
                .get(self.endpoint(&["posts"])?)
                .query(&[("maxResults", self.page_size.to_string())])
                .query(&[("key", self.api_key.as_str())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }
            let list: PostList = self.send(request).await?.json().await?;
            info!(
                "Added {} posts (total: {})",
                list.items.len(),
                posts.len() + list.items.len()
            );
            posts.extend(list.items);
            page_token = list.next_page_token;
            if posts.len() >= max {
                posts.truncate(max);
                break;
            }
            if page_token.is_none() {
                break;
            }
            debug!("Waiting {:?} before the next page", self.page_delay);
            sleep(self.page_delay).await;
        }
        info!("Total posts fetched: {}", posts.len());
        Ok(posts)
    }

    pub async fn search_posts(&self, query: &str) -> Result<Vec<Post>, BloggerError> {
        let request = self
            .client
            .get(self.endpoint(&["posts", "search"])?)
            .query(&[("q", query), ("key", self.api_key.as_str())]);
        let list: PostList = self.send(request).await?.json().await?;
        Ok(list.items)
    }

    pub async fn update_post(&self, id: &PostId, update: &PostUpdate) -> Result<(), BloggerError> {
        let token = self.token("update posts")?;
        let id_segment = id.to_string();
        let request = self
            .client
            .put(self.endpoint(&["posts", id_segment.as_str()])?)
            .bearer_auth(token)
            .header(header::CONTENT_TYPE, "application/json")
            .json(update);
        self.send(request).await?;
        info!("Successfully updated post {id}");
        Ok(())
    }

    pub async fn delete_post(&self, id: &PostId) -> Result<DeleteOutcome, BloggerError> {
        let token = self.token("delete posts")?;
        let id_segment = id.to_string();
        let request = self
            .client
            .delete(self.endpoint(&["posts", id_segment.as_str()])?)
            .bearer_auth(token);
        match self.send(request).await {
            Ok(_) => {
                info!("Successfully deleted post {id}");
                Ok(DeleteOutcome::Deleted)
            }
            Err(BloggerError::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }) => {
                info!("Post {id} not found (already deleted)");
                Ok(DeleteOutcome::AlreadyGone)
            }
            Err(e) => Err(e),
        }
    }

    /// Resolves a published post URL to its id.
    ///
    /// URLs of the form `.../posts/<id>` are read directly; otherwise the last
    /// path segment is turned into a search query and an exact URL match is
    /// preferred over the first hit.
    pub async fn find_post_id_by_url(&self, post_url: &str) -> Result<Option<PostId>, BloggerError> {
        if let Some(captures) = regex!(r"/posts/(\d+)").captures(post_url) {
            return Ok(Some(captures[1].to_owned().into()));
        }
        let query = search_query_from_url(post_url);
        debug!("Searching posts for {query:?}");
        let hits = self.search_posts(&query).await?;
        let found = hits
            .iter()
            .find(|post| post.url == post_url)
            .or_else(|| hits.first())
            .map(|post| post.id.clone());
        if found.is_none() {
            info!("No post found for URL: {post_url}");
        }
        Ok(found)
    }

    fn token(&self, action: &'static str) -> Result<&str, BloggerError> {
        self.access_token
            .as_ref()
            .map(AccessToken::as_str)
            .ok_or(BloggerError::MissingToken(action))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BloggerError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| BloggerError::BadBase(self.base.clone()))?
            .pop_if_empty()
            .extend(["blogs", self.blog_id.as_str()])
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, BloggerError> {
        let request = request.build()?;
        let method = request.method().clone();
        let mut url = request.url().clone();
        // the query carries the API key
        url.set_query(None);
        debug!("{method} {url}");
        let response = self.client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(BloggerError::Status {
            method,
            url,
            status,
            body,
        })
    }
}

fn search_query_from_url(post_url: &str) -> String {
    let last = post_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    last.replace(".html", "").replace('-', " ")
}

#[cfg(test)]
mod tests {
    use match_posts_utils::credentials::Credentials;
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::{search_query_from_url, BloggerClient, BloggerError};
    use crate::{
        blogger::schema::{DeleteOutcome, PostUpdate},
        settings::{Pacing, Settings},
    };

    fn post(id: &str, url: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Post {id}"),
            "content": "",
            "url": url,
            "published": "2026-10-19T09:00:00+03:00",
        })
    }

    async fn client(server: &MockServer, token: Option<&str>) -> BloggerClient {
        let settings = Settings {
            api_base: server.uri().parse().unwrap(),
            page_size: 2,
            pacing: Pacing::none(),
            ..Default::default()
        };
        let credentials = Credentials::builder()
            .blog_id("b1".to_owned().into())
            .api_key("key".to_owned().into())
            .access_token(token.map(|t| t.to_owned().into()))
            .build();
        BloggerClient::new(credentials, &settings).unwrap()
    }

    #[tokio::test]
    async fn follows_page_tokens_and_truncates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blogs/b1/posts"))
            .and(query_param("pageToken", "p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [post("3", "u3"), post("4", "u4")],
                "nextPageToken": "p3"
            })))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/blogs/b1/posts"))
            .and(query_param("key", "key"))
            .and(query_param("maxResults", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [post("1", "u1"), post("2", "u2")],
                "nextPageToken": "p2"
            })))
            .mount(&server)
            .await;

        let client = client(&server, None).await;
        let posts = client.list_posts(3).await.unwrap();
        let ids = posts.iter().map(|p| p.id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn stops_without_page_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blogs/b1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [post("1", "u1")]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let posts = client(&server, None).await.list_posts(500).await.unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn update_sends_bearer_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/blogs/b1/posts/7"))
            .and(header("authorization", "Bearer tok"))
            .and(body_json(json!({ "title": "T", "content": "C" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(post("7", "u7")))
            .expect(1)
            .mount(&server)
            .await;
        let update = PostUpdate {
            title: "T".into(),
            content: "C".into(),
        };
        client(&server, Some("tok"))
            .await
            .update_post(&"7".to_owned().into(), &update)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn writes_need_a_token() {
        let server = MockServer::start().await;
        let err = client(&server, None)
            .await
            .delete_post(&"7".to_owned().into())
            .await
            .unwrap_err();
        assert!(matches!(err, BloggerError::MissingToken(_)));
    }

    #[tokio::test]
    async fn delete_treats_404_as_gone() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/blogs/b1/posts/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/blogs/b1/posts/2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/blogs/b1/posts/3"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        let client = client(&server, Some("tok")).await;
        let outcome = client.delete_post(&"1".to_owned().into()).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        let outcome = client.delete_post(&"2".to_owned().into()).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::AlreadyGone);
        match client.delete_post(&"3".to_owned().into()).await.unwrap_err() {
            BloggerError::Status { status, body, url, .. } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
                assert!(url.query().is_none());
            }
            e => panic!("unexpected error {e:?}"),
        }
    }

    #[tokio::test]
    async fn resolves_post_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blogs/b1/posts/search"))
            .and(query_param("q", "a vs b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    post("10", "https://blog.example/2026/10/other.html"),
                    post("11", "https://blog.example/2026/10/a-vs-b.html")
                ]
            })))
            .mount(&server)
            .await;
        let client = client(&server, None).await;
        let direct = client
            .find_post_id_by_url("https://www.blogger.com/blogs/1/posts/123456")
            .await
            .unwrap();
        assert_eq!(direct, Some("123456".to_owned().into()));
        let searched = client
            .find_post_id_by_url("https://blog.example/2026/10/a-vs-b.html")
            .await
            .unwrap();
        assert_eq!(searched, Some("11".to_owned().into()));
    }

    #[test]
    fn query_from_url() {
        assert_eq!(
            search_query_from_url("https://blog.example/2026/10/al-ahly-vs-zamalek.html"),
            "al ahly vs zamalek"
        );
    }
}
