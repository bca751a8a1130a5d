//! Track operations.

use crate::client::{push_field, require_href, ClarifyClient};
use crate::error::Result;
use crate::transport::{Fields, Method};
use crate::types::{NewTrack, Resource};
use tracing::debug;

impl ClarifyClient {
    /// Add a track to a bundle. `href` is the bundle's `clarify:tracks`
    /// link. The number of tracks per bundle is limited server-side; going
    /// over the limit fails like any other rejected request.
    pub fn create_track(&self, href: &str, track: &NewTrack) -> Result<Resource> {
        require_href(href)?;

        let mut fields = Fields::new();
        fields.push(("media_url".to_string(), track.media_url.clone()));
        push_field(&mut fields, "label", track.label.as_ref());
        push_field(&mut fields, "audio_channel", track.audio_channel.as_ref());

        self.fetch(Method::Post, href, fields)
    }

    /// Get the track list of a bundle.
    pub fn get_track_list(&self, href: &str) -> Result<Resource> {
        require_href(href)?;
        self.fetch(Method::Get, href, Fields::new())
    }

    /// Get a single track.
    pub fn get_track(&self, href: &str) -> Result<Resource> {
        require_href(href)?;
        self.fetch(Method::Get, href, Fields::new())
    }

    /// Delete the track at `index` of the track list at `href`, or every
    /// track when `index` is `None`.
    pub fn delete_track_at_index(&self, href: &str, index: Option<u32>) -> Result<()> {
        require_href(href)?;

        let mut fields = Fields::new();
        push_field(&mut fields, "track", index);
        debug!(href = %href, index = ?index, "Deleting track(s)");

        self.remove(href, fields)
    }

    /// Delete a track by its own href.
    pub fn delete_track(&self, href: &str) -> Result<()> {
        require_href(href)?;
        self.remove(href, Fields::new())
    }
}
