use crate::models::catalogue::{Event, Project};
use crate::models::qr_code::InternalKind;

/// Canonical in-platform URL for an internal resource, or `""` when the
/// selection does not carry enough to build one.
///
/// `base_url` is the deployment origin without a trailing slash.
pub fn internal_link(
    base_url: &str,
    username: &str,
    category: InternalKind,
    project: Option<&Project>,
    event: Option<&Event>,
) -> String {
    match category {
        InternalKind::Profile | InternalKind::LinkInBio => {
            if username.is_empty() {
                return String::new();
            }
            format!("{}/p/{}", base_url, username)
        }
        InternalKind::Project => match project.and_then(|p| p.id) {
            Some(id) => format!("{}/proyecto/{}", base_url, id.to_hex()),
            None => String::new(),
        },
        InternalKind::Event => {
            let Some(event) = event else {
                return String::new();
            };
            let slug = event.slug.as_deref().filter(|s| !s.is_empty());
            match (event.organizer_username(), slug) {
                (Some(organizer), Some(slug)) => {
                    format!("{}/evento/{}/{}", base_url, organizer, slug)
                }
                _ => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalogue::Organizer;
    use mongodb::bson::oid::ObjectId;

    const BASE: &str = "https://smartqr.test";

    fn event(slug: Option<&str>, organizer: Option<&str>) -> Event {
        Event {
            id: Some(ObjectId::new()),
            organizer_id: "owner".into(),
            title: "Launch night".into(),
            slug: slug.map(String::from),
            organizer: Some(Organizer {
                username: organizer.map(String::from),
            }),
            is_published: true,
        }
    }

    #[test]
    fn profile_and_link_in_bio_share_the_profile_url() {
        for category in [InternalKind::Profile, InternalKind::LinkInBio] {
            assert_eq!(
                internal_link(BASE, "ana", category, None, None),
                "https://smartqr.test/p/ana"
            );
        }
    }

    #[test]
    fn project_needs_an_identifier() {
        let id = ObjectId::new();
        let mut project = Project {
            id: Some(id),
            owner_id: "owner".into(),
            name: "Mural".into(),
            is_published: true,
        };
        assert_eq!(
            internal_link(BASE, "ana", InternalKind::Project, Some(&project), None),
            format!("{}/proyecto/{}", BASE, id.to_hex())
        );

        project.id = None;
        assert_eq!(
            internal_link(BASE, "ana", InternalKind::Project, Some(&project), None),
            ""
        );
        assert_eq!(internal_link(BASE, "ana", InternalKind::Project, None, None), "");
    }

    #[test]
    fn event_resolves_only_with_slug_and_organizer() {
        let cases = [
            (Some("launch"), Some("org"), true),
            (Some("launch"), None, false),
            (None, Some("org"), false),
            (None, None, false),
        ];
        for (slug, organizer, resolvable) in cases {
            let e = event(slug, organizer);
            let url = internal_link(BASE, "ana", InternalKind::Event, None, Some(&e));
            assert_eq!(!url.is_empty(), resolvable, "slug={slug:?} organizer={organizer:?}");
        }

        let e = event(Some("launch"), Some("org"));
        assert_eq!(
            internal_link(BASE, "ana", InternalKind::Event, None, Some(&e)),
            "https://smartqr.test/evento/org/launch"
        );
    }

    #[test]
    fn event_without_selection_is_unresolved() {
        assert_eq!(internal_link(BASE, "ana", InternalKind::Event, None, None), "");
    }
}
