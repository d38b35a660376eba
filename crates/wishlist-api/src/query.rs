// Turns the user's filter selection into a list request

/// Tri-state filter on the downloaded flag
///
/// `Any` means "no constraint" and is never sent to the server, while
/// `NotDownloaded` is sent explicitly as `downloaded=false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadedFilter {
    #[default]
    Any,
    Downloaded,
    NotDownloaded,
}

impl DownloadedFilter {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            DownloadedFilter::Any => None,
            DownloadedFilter::Downloaded => Some(true),
            DownloadedFilter::NotDownloaded => Some(false),
        }
    }

    /// Next value in the selector cycle: Any -> Downloaded -> NotDownloaded -> Any
    pub fn cycle(self) -> Self {
        match self {
            DownloadedFilter::Any => DownloadedFilter::Downloaded,
            DownloadedFilter::Downloaded => DownloadedFilter::NotDownloaded,
            DownloadedFilter::NotDownloaded => DownloadedFilter::Any,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DownloadedFilter::Any => "All Items",
            DownloadedFilter::Downloaded => "Downloaded",
            DownloadedFilter::NotDownloaded => "Not Downloaded",
        }
    }
}

impl From<Option<bool>> for DownloadedFilter {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => DownloadedFilter::Any,
            Some(true) => DownloadedFilter::Downloaded,
            Some(false) => DownloadedFilter::NotDownloaded,
        }
    }
}

/// What the user is currently filtering by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub category: String,
    pub downloaded: DownloadedFilter,
}

impl FilterState {
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty()
            && self.category.is_empty()
            && self.downloaded == DownloadedFilter::Any
    }

    pub fn to_request(&self) -> ListRequest {
        build_request(self)
    }
}

/// Describes a read against the wishlist collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    /// Plain `GET /wishlist/`
    All,
    /// `GET /wishlist/search/` with the constrained dimensions only
    Search(Vec<(&'static str, String)>),
}

impl ListRequest {
    pub fn path(&self) -> &'static str {
        match self {
            ListRequest::All => "/wishlist/",
            ListRequest::Search(_) => "/wishlist/search/",
        }
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        match self {
            ListRequest::All => &[],
            ListRequest::Search(params) => params,
        }
    }

    /// Look up a single query parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params()
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Build the request descriptor for a filter state
///
/// Unconstrained dimensions are left out entirely rather than sent as empty
/// strings, and a fully unconstrained state maps to the list-all request.
pub fn build_request(filters: &FilterState) -> ListRequest {
    if filters.is_unconstrained() {
        return ListRequest::All;
    }

    let mut params = Vec::with_capacity(3);

    if !filters.search_term.is_empty() {
        params.push(("query", filters.search_term.clone()));
    }

    if !filters.category.is_empty() {
        params.push(("category", filters.category.clone()));
    }

    if let Some(downloaded) = filters.downloaded.as_bool() {
        params.push(("downloaded", downloaded.to_string()));
    }

    ListRequest::Search(params)
}
