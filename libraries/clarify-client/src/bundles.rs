//! Bundle operations: listing, search, create, fetch, update, delete.

use crate::client::{
    collection_path, push_field, require_href, require_limit, ClarifyClient,
};
use crate::embed::{compose, override_embed, Embed, EmbedFlags};
use crate::error::Result;
use crate::pagination::for_each;
use crate::query::HrefQuery;
use crate::transport::{Fields, Method};
use crate::types::{BundleUpdate, NewBundle, Resource, SearchQuery};
use std::ops::ControlFlow;
use tracing::debug;

const BUNDLES: &str = "bundles";
const SEARCH: &str = "search";

impl ClarifyClient {
    /// Get a page of bundles.
    ///
    /// With no `href` the first page is fetched. Otherwise `href` is a
    /// `next`/`prev`/`first`/`last` link of an earlier page and `limit` and
    /// `embed` override the values it carries.
    pub fn get_bundle_list(
        &self,
        href: Option<&str>,
        limit: Option<u32>,
        embed: EmbedFlags,
    ) -> Result<Resource> {
        require_limit(limit)?;

        match href {
            None => {
                let mut fields = Fields::new();
                push_field(&mut fields, "limit", limit);
                push_field(&mut fields, "embed", compose(&embed));
                self.fetch(Method::Get, &collection_path(BUNDLES), fields)
            }
            Some(href) => self.get_additional_page(href, limit, &embed),
        }
    }

    /// Search the bundle collection.
    ///
    /// The first page is built from `query`; later pages are fetched from
    /// their href, which already carries the search state, so `query` is
    /// ignored when `href` is given.
    pub fn search(
        &self,
        href: Option<&str>,
        query: &SearchQuery,
        limit: Option<u32>,
        embed: EmbedFlags,
    ) -> Result<Resource> {
        require_limit(limit)?;

        match href {
            None => {
                let mut fields = Fields::new();
                fields.push(("query".to_string(), query.query.clone()));
                push_field(&mut fields, "query_fields", query.query_fields.as_ref());
                push_field(&mut fields, "filter", query.filter.as_ref());
                push_field(&mut fields, "language", query.language.as_ref());
                push_field(&mut fields, "limit", limit);
                push_field(&mut fields, "embed", compose(&embed));
                debug!(query = %query.query, "Searching bundles");
                self.fetch(Method::Get, &collection_path(SEARCH), fields)
            }
            Some(href) => self.get_additional_page(href, limit, &embed),
        }
    }

    /// Fetch a page from an href, reconciling `limit` and `embed` with
    /// the parameters it already carries.
    fn get_additional_page(
        &self,
        href: &str,
        limit: Option<u32>,
        embed: &EmbedFlags,
    ) -> Result<Resource> {
        require_href(href)?;

        let mut query = HrefQuery::parse(href);
        if let Some(limit) = limit {
            query.set("limit", limit.to_string());
        }
        let final_embed = override_embed(query.get("embed"), embed);
        query.set_or_remove("embed", final_embed);

        debug!(href = %href, rewritten = %query.to_href(), "Fetching page");

        let (path, fields) = query.into_parts();
        self.fetch(Method::Get, &path, fields)
    }

    /// Create a new bundle.
    pub fn create_bundle(&self, bundle: &NewBundle) -> Result<Resource> {
        let mut fields = Fields::new();
        push_field(&mut fields, "name", bundle.name.as_ref());
        push_field(&mut fields, "media_url", bundle.media_url.as_ref());
        push_field(&mut fields, "audio_channel", bundle.audio_channel.as_ref());
        push_field(&mut fields, "metadata", bundle.metadata.as_ref());
        push_field(&mut fields, "notify_url", bundle.notify_url.as_ref());
        push_field(&mut fields, "external_id", bundle.external_id.as_ref());

        self.fetch(Method::Post, &collection_path(BUNDLES), fields)
    }

    /// Get a bundle. Items never apply to a single bundle and are not sent.
    pub fn get_bundle(&self, href: &str, embed: EmbedFlags) -> Result<Resource> {
        require_href(href)?;

        let mut fields = Fields::new();
        push_field(
            &mut fields,
            "embed",
            compose(&EmbedFlags {
                items: Embed::Off,
                ..embed
            }),
        );
        self.fetch(Method::Get, href, fields)
    }

    /// Update a bundle's name, notify URL or external id.
    ///
    /// When `version` is set it must match the server's copy or the call
    /// fails with `409 Conflict`; re-fetch and retry in that case.
    pub fn update_bundle(&self, href: &str, update: &BundleUpdate) -> Result<Resource> {
        require_href(href)?;

        let mut fields = Fields::new();
        push_field(&mut fields, "name", update.name.as_ref());
        push_field(&mut fields, "notify_url", update.notify_url.as_ref());
        push_field(&mut fields, "external_id", update.external_id.as_ref());
        push_field(&mut fields, "version", update.version);

        self.fetch(Method::Put, href, fields)
    }

    /// Delete a bundle.
    pub fn delete_bundle(&self, href: &str) -> Result<()> {
        require_href(href)?;
        self.remove(href, Fields::new())
    }

    /// Call `apply` with the href of every bundle, page by page, until it
    /// breaks or the list is exhausted. `start` is an already fetched page
    /// to begin with.
    pub fn bundle_list_map<F>(&self, mut apply: F, start: Option<Resource>) -> Result<()>
    where
        F: FnMut(&Self, &str) -> Result<ControlFlow<()>>,
    {
        for_each(
            |href| self.get_bundle_list(href, None, EmbedFlags::none()),
            |href| apply(self, href),
            start,
        )
    }
}
