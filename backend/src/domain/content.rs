//! Content envelope and typed page models.
//!
//! Every collection endpoint answers with `{ data, meta? }`. Page models are
//! lenient: unknown fields are ignored and missing optional fields default,
//! so additive schema changes in the content backend do not take pages down.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::media::MediaReference;
use super::ports::Collection;
use super::rich_text::RichTextBlock;

/// Response envelope shared by every content endpoint.
///
/// ## Invariants
/// - `data` is present on success; `None` means the page is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T> PageContent<T> {
    /// Envelope carrying `data` and no metadata.
    pub fn new(data: T) -> Self {
        Self {
            data: Some(data),
            meta: None,
        }
    }

    /// Envelope signalling an unavailable page.
    pub fn empty() -> Self {
        Self {
            data: None,
            meta: None,
        }
    }

    /// Whether the envelope carries no data.
    pub fn is_unavailable(&self) -> bool {
        self.data.is_none()
    }

    /// Consume the envelope, keeping only the data.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl PageContent<Value> {
    /// Decode the raw JSON data into a typed model.
    ///
    /// A `null` data field stays `None` rather than failing.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the data does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<PageContent<T>, serde_json::Error> {
        let data = match self.data {
            None | Some(Value::Null) => None,
            Some(raw) => Some(serde_json::from_value(raw)?),
        };
        Ok(PageContent {
            data,
            meta: self.meta,
        })
    }
}

/// Envelope metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Pagination block for collection responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u64,
}

/// Rewrite embedded media URLs against the API origin.
pub trait ResolveMedia {
    /// Replace every media URL with its fully-qualified form.
    fn resolve_media(&mut self, origin: &str);
}

impl ResolveMedia for MediaReference {
    fn resolve_media(&mut self, origin: &str) {
        self.resolve_in_place(origin);
    }
}

impl<T: ResolveMedia> ResolveMedia for Option<T> {
    fn resolve_media(&mut self, origin: &str) {
        if let Some(inner) = self {
            inner.resolve_media(origin);
        }
    }
}

impl<T: ResolveMedia> ResolveMedia for Vec<T> {
    fn resolve_media(&mut self, origin: &str) {
        for item in self {
            item.resolve_media(origin);
        }
    }
}

/// A page model bound to the collection it is loaded from.
pub trait PageModel: DeserializeOwned + Serialize + ResolveMedia + Send + 'static {
    /// Collection holding this page.
    const COLLECTION: Collection;
}

macro_rules! page_model {
    (
        $(#[$meta:meta])*
        $name:ident => $collection:ident {
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
        media: [ $($media:ident),* ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct $name {
            $( $(#[$field_meta])* pub $field: $ty, )*
        }

        impl ResolveMedia for $name {
            #[allow(unused_variables, reason = "media list may be empty")]
            fn resolve_media(&mut self, origin: &str) {
                $( self.$media.resolve_media(origin); )*
            }
        }

        impl PageModel for $name {
            const COLLECTION: Collection = Collection::$collection;
        }
    };
}

macro_rules! content_item {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
        media: [ $($media:ident),* ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct $name {
            $( $(#[$field_meta])* pub $field: $ty, )*
        }

        impl ResolveMedia for $name {
            #[allow(unused_variables, reason = "media list may be empty")]
            fn resolve_media(&mut self, origin: &str) {
                $( self.$media.resolve_media(origin); )*
            }
        }
    };
}

content_item! {
    /// Search-engine metadata attached to a page.
    Seo {
        meta_title: Option<String>,
        meta_description: Option<String>,
        share_image: Option<MediaReference>,
    }
    media: [share_image]
}

content_item! {
    /// One offered service.
    ServiceItem {
        id: Option<u64>,
        title: String,
        description: Option<String>,
        icon: Option<MediaReference>,
    }
    media: [icon]
}

content_item! {
    /// One step of the delivery process.
    ProcessStep {
        id: Option<u64>,
        step_number: Option<u32>,
        title: String,
        description: Option<String>,
    }
    media: []
}

content_item! {
    /// One portfolio entry.
    WorkItem {
        id: Option<u64>,
        title: String,
        slug: Option<String>,
        client: Option<String>,
        summary: Option<String>,
        cover: Option<MediaReference>,
        gallery: Vec<MediaReference>,
        tags: Vec<String>,
    }
    media: [cover, gallery]
}

content_item! {
    /// One team member shown on the about page.
    TeamMember {
        id: Option<u64>,
        name: String,
        role: Option<String>,
        photo: Option<MediaReference>,
    }
    media: [photo]
}

content_item! {
    /// Social profile link shown in the footer.
    SocialLink {
        platform: String,
        url: String,
    }
    media: []
}

page_model! {
    /// Landing page.
    HomePage => Homepage {
        title: String,
        subtitle: Option<String>,
        hero_image: Option<MediaReference>,
        content: Vec<RichTextBlock>,
        featured_works: Vec<WorkItem>,
        seo: Option<Seo>,
    }
    media: [hero_image, featured_works, seo]
}

page_model! {
    /// About page.
    AboutPage => About {
        title: String,
        content: Vec<RichTextBlock>,
        image: Option<MediaReference>,
        team: Vec<TeamMember>,
        seo: Option<Seo>,
    }
    media: [image, team, seo]
}

page_model! {
    /// Services overview.
    ServicePage => Service {
        title: String,
        intro: Option<String>,
        services: Vec<ServiceItem>,
        seo: Option<Seo>,
    }
    media: [services, seo]
}

page_model! {
    /// Delivery process page.
    ProcessPage => Process {
        title: String,
        intro: Option<String>,
        steps: Vec<ProcessStep>,
        seo: Option<Seo>,
    }
    media: [seo]
}

page_model! {
    /// Portfolio page.
    WorkPage => Work {
        title: String,
        intro: Option<String>,
        works: Vec<WorkItem>,
        seo: Option<Seo>,
    }
    media: [works, seo]
}

page_model! {
    /// Contact page copy; the form itself lives client-side.
    ContactPage => Contact {
        title: String,
        intro: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        seo: Option<Seo>,
    }
    media: [seo]
}

page_model! {
    /// Site-wide settings rendered on every page.
    GlobalSettings => GlobalSettings {
        site_name: String,
        tagline: Option<String>,
        logo: Option<MediaReference>,
        favicon: Option<MediaReference>,
        footer_text: Option<String>,
        social_links: Vec<SocialLink>,
        default_seo: Option<Seo>,
    }
    media: [logo, favicon, default_seo]
}
