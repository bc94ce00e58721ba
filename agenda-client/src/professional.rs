//! Professional detail page
//!
//! The professional is fetched once; switching tabs only changes which part
//! of the loaded record is shown.

use shared::models::{Professional, Review, ReviewCreate, Service, WorkingHours};
use validator::Validate;

use crate::api::ApiClient;
use crate::toast::ToastQueue;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfessionalTab {
    #[default]
    Services,
    Reviews,
    About,
}

/// Content of the selected tab
#[derive(Debug, Clone, PartialEq)]
pub enum TabContent<'a> {
    Services(Vec<&'a Service>),
    Reviews(&'a [Review]),
    About {
        bio: Option<&'a str>,
        working_hours: &'a [WorkingHours],
    },
}

#[derive(Debug, Clone)]
pub struct ProfessionalPage {
    api: ApiClient,
    toasts: ToastQueue,
    professional: Option<Professional>,
    tab: ProfessionalTab,
}

impl ProfessionalPage {
    pub fn new(api: ApiClient, toasts: ToastQueue) -> Self {
        Self {
            api,
            toasts,
            professional: None,
            tab: ProfessionalTab::default(),
        }
    }

    /// `GET /professionals/{id}/`
    pub async fn load(&mut self, id: &str) -> ClientResult<&Professional> {
        match self.api.get_professional(id).await {
            Ok(professional) => {
                self.tab = ProfessionalTab::default();
                Ok(self.professional.insert(professional))
            }
            Err(e) => {
                tracing::warn!(professional_id = %id, error = %e, "Failed to load professional");
                self.professional = None;
                Err(e)
            }
        }
    }

    pub fn professional(&self) -> Option<&Professional> {
        self.professional.as_ref()
    }

    pub fn tab(&self) -> ProfessionalTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: ProfessionalTab) {
        self.tab = tab;
    }

    pub fn tab_content(&self) -> Option<TabContent<'_>> {
        let p = self.professional.as_ref()?;
        Some(match self.tab {
            ProfessionalTab::Services => {
                TabContent::Services(p.services.iter().filter(|s| s.is_active).collect())
            }
            ProfessionalTab::Reviews => TabContent::Reviews(&p.reviews),
            ProfessionalTab::About => TabContent::About {
                bio: p.bio.as_deref(),
                working_hours: &p.working_hours,
            },
        })
    }

    /// Post a review and fold it into the loaded professional
    ///
    /// The review is prepended and the aggregate rating recomputed locally,
    /// without refetching.
    pub async fn post_review(&mut self, review: ReviewCreate) -> ClientResult<Review> {
        review.validate()?;
        let professional_id = self
            .professional
            .as_ref()
            .map(|p| p.id.clone())
            .ok_or_else(|| ClientError::NotFound("professional not loaded".into()))?;

        match self.api.post_review(&professional_id, &review).await {
            Ok(created) => {
                if let Some(p) = self.professional.as_mut() {
                    p.reviews.insert(0, created.clone());
                    p.record_review(created.rating);
                }
                self.toasts.success("Avaliação enviada!");
                Ok(created)
            }
            Err(e) => {
                tracing::warn!(%professional_id, error = %e, "Failed to post review");
                self.toasts.error(e.user_message());
                Err(e)
            }
        }
    }

    /// Flip the local "liked" flag of a review; returns the new value
    pub fn toggle_like(&mut self, review_id: &str) -> Option<bool> {
        let review = self
            .professional
            .as_mut()?
            .reviews
            .iter_mut()
            .find(|r| r.id == review_id)?;
        review.liked = !review.liked;
        Some(review.liked)
    }
}
