//! Professional directory
//!
//! Holds the fetched list, the filter selections and the derived visible
//! list. Each fetch takes a [`LoadTicket`]; a response is applied only if its
//! ticket is still the latest, so a slow earlier request can never overwrite
//! a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use shared::Page;
use shared::filter::FilterQuery;
use shared::models::Professional;

pub use shared::filter::{FilterCatalog, FilterState, PriceRange, apply_filters};

use crate::api::ApiClient;
use crate::{ClientError, ClientResult};

const PAGE_SIZE: u32 = 100;

/// What the directory page should render
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryView {
    Loading,
    Ready(Vec<Professional>),
    /// Nothing matches; offer "clear filters" when any filter is active
    Empty { can_clear_filters: bool },
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug)]
struct DirectoryState {
    all: Vec<Professional>,
    visible: Vec<Professional>,
    filters: FilterState,
    catalog: FilterCatalog,
    status: LoadStatus,
}

impl DirectoryState {
    fn rederive(&mut self) {
        self.visible = apply_filters(&self.all, &self.filters);
    }
}

/// Sequence number of one fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone)]
pub struct Directory {
    api: ApiClient,
    state: Arc<Mutex<DirectoryState>>,
    latest: Arc<AtomicU64>,
}

impl Directory {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(DirectoryState {
                all: Vec::new(),
                visible: Vec::new(),
                filters: FilterState::default(),
                catalog: FilterCatalog::default(),
                status: LoadStatus::Idle,
            })),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DirectoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fetch every professional and re-derive the visible list
    ///
    /// Returns `Ok(false)` when a newer load superseded this one. A failed
    /// fetch empties the list and shows the error view; nothing is retried.
    pub async fn load(&self) -> ClientResult<bool> {
        let ticket = self.begin_load();
        let result = self.fetch_all().await;
        self.finish_load(ticket, result)
    }

    async fn fetch_all(&self) -> ClientResult<Vec<Professional>> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let query = FilterQuery {
                page: Some(page),
                per_page: Some(PAGE_SIZE),
                ..Default::default()
            };
            let Page {
                items: batch,
                pagination,
            } = self.api.list_professionals(&query).await?;
            items.extend(batch);
            if !pagination.has_next() {
                break;
            }
            page += 1;
        }
        Ok(items)
    }

    /// Start a fetch; only the most recent ticket can be applied
    pub fn begin_load(&self) -> LoadTicket {
        let ticket = LoadTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        self.lock().status = LoadStatus::Loading;
        ticket
    }

    /// Apply a fetch result if `ticket` is still the latest
    pub fn finish_load(
        &self,
        ticket: LoadTicket,
        result: ClientResult<Vec<Professional>>,
    ) -> ClientResult<bool> {
        let mut state = self.lock();
        if ticket.0 != self.latest.load(Ordering::SeqCst) {
            tracing::debug!(ticket = ticket.0, "Discarding stale directory response");
            return Ok(false);
        }

        match result {
            Ok(professionals) => {
                tracing::info!(count = professionals.len(), "Directory loaded");
                state.catalog = FilterCatalog::from_professionals(&professionals);
                state.all = professionals;
                let catalog = state.catalog.clone();
                state.filters.retain_known(&catalog);
                state.status = LoadStatus::Loaded;
                state.rederive();
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load professionals");
                state.all.clear();
                state.visible.clear();
                state.status = LoadStatus::Failed(load_error_message(&e));
                Err(e)
            }
        }
    }

    pub fn view(&self) -> DirectoryView {
        let state = self.lock();
        match &state.status {
            LoadStatus::Idle | LoadStatus::Loading => DirectoryView::Loading,
            LoadStatus::Failed(message) => DirectoryView::Error(message.clone()),
            LoadStatus::Loaded if state.visible.is_empty() => DirectoryView::Empty {
                can_clear_filters: !state.filters.is_empty(),
            },
            LoadStatus::Loaded => DirectoryView::Ready(state.visible.clone()),
        }
    }

    pub fn visible(&self) -> Vec<Professional> {
        self.lock().visible.clone()
    }

    pub fn all(&self) -> Vec<Professional> {
        self.lock().all.clone()
    }

    pub fn filters(&self) -> FilterState {
        self.lock().filters.clone()
    }

    pub fn catalog(&self) -> FilterCatalog {
        self.lock().catalog.clone()
    }

    pub fn active_filter_count(&self) -> usize {
        self.lock().filters.active_filter_count()
    }

    pub fn set_filters(&self, filters: FilterState) {
        let mut state = self.lock();
        state.filters = filters;
        state.rederive();
    }

    /// Mutate the filters in place and re-derive
    pub fn update_filters(&self, f: impl FnOnce(&mut FilterState)) {
        let mut state = self.lock();
        f(&mut state.filters);
        state.rederive();
    }

    pub fn clear_filters(&self) {
        self.update_filters(FilterState::clear);
    }

    /// Top `n` professionals by rating
    pub fn featured(&self, n: usize) -> Vec<Professional> {
        let mut all = self.lock().all.clone();
        all.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        all.truncate(n);
        all
    }
}

fn load_error_message(error: &ClientError) -> String {
    match error {
        ClientError::Http(_) => "Não foi possível carregar os profissionais.".to_string(),
        other => other.user_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{NetworkHttpClient, Transport};
    use crate::session::SessionStore;
    use rust_decimal::Decimal;
    use shared::models::Location;
    use std::time::Duration;

    fn offline_directory() -> Directory {
        let transport = Transport::Network(
            NetworkHttpClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap(),
        );
        Directory::new(ApiClient::new(
            transport,
            SessionStore::in_memory(Duration::from_secs(60)),
        ))
    }

    fn professional(id: &str, zone: &str, home: bool, rating: f32) -> Professional {
        Professional {
            id: id.into(),
            name: format!("Profissional {id}"),
            specialty: "Cabeleireira".into(),
            bio: None,
            profile_image: String::new(),
            cover_image: None,
            rating,
            review_count: 0,
            location: Location {
                district: "Centro".into(),
                zone: zone.into(),
                address: None,
            },
            offers_home_service: home,
            home_service_fee: Decimal::from(50),
            contact: None,
            working_hours: vec![],
            services: vec![],
            reviews: vec![],
            categories: vec![],
            is_verified: true,
        }
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let dir = offline_directory();
        let first = dir.begin_load();
        let second = dir.begin_load();

        assert!(dir
            .finish_load(second, Ok(vec![professional("new", "Zona Sul", true, 4.0)]))
            .unwrap());
        assert!(!dir
            .finish_load(first, Ok(vec![professional("old", "Zona Sul", true, 4.0)]))
            .unwrap());

        let ids: Vec<String> = dir.visible().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["new"]);
    }

    #[test]
    fn test_views_follow_status_and_filters() {
        let dir = offline_directory();
        assert_eq!(dir.view(), DirectoryView::Loading);

        let ticket = dir.begin_load();
        dir.finish_load(
            ticket,
            Ok(vec![
                professional("1", "Zona Sul", false, 4.2),
                professional("2", "Zona Norte", true, 4.9),
            ]),
        )
        .unwrap();
        assert!(matches!(dir.view(), DirectoryView::Ready(list) if list.len() == 2));

        dir.update_filters(|f| {
            f.toggle_zone("Zona Sul");
            f.home_service = Some(true);
        });
        assert_eq!(dir.active_filter_count(), 2);
        assert_eq!(
            dir.view(),
            DirectoryView::Empty {
                can_clear_filters: true
            }
        );

        dir.clear_filters();
        assert_eq!(dir.visible(), dir.all());
        assert_eq!(dir.featured(1)[0].id, "2");
    }

    #[test]
    fn test_failed_load_shows_error_with_empty_list() {
        let dir = offline_directory();
        let ticket = dir.begin_load();
        let err = dir
            .finish_load(ticket, Err(ClientError::Internal("boom".into())))
            .unwrap_err();
        assert!(matches!(err, ClientError::Internal(_)));
        assert!(dir.all().is_empty());
        assert!(matches!(dir.view(), DirectoryView::Error(_)));
    }
}
