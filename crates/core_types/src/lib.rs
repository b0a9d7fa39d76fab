pub type RequestId = u64;

/// Milliseconds on the navigator's clock.
pub type Millis = u64;

/// Why a page fetch was issued. Navigation fetches drive a pending load;
/// prefetches only ever feed the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchPurpose {
    Navigate,
    Prefetch,
}

impl FetchPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchPurpose::Navigate => "navigate",
            FetchPurpose::Prefetch => "prefetch",
        }
    }
}
