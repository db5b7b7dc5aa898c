use crate::client::SubmissionClient;
use crate::domain::HomeStats;

/// Landing page statistics. Any failure shows zeros instead of an error.
pub struct HomePage {
    stats: HomeStats,
    loading: bool,
}

impl HomePage {
    pub fn new() -> Self {
        Self {
            stats: HomeStats::default(),
            loading: true,
        }
    }

    pub fn stats(&self) -> &HomeStats {
        &self.stats
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn load(&mut self, client: &SubmissionClient) -> &HomeStats {
        self.loading = true;

        self.stats = match client.fetch_stats().await {
            Ok(resp) if resp.success => resp.stats.unwrap_or_default(),
            Ok(resp) => {
                tracing::error!(
                    "Failed to fetch stats: {}",
                    resp.error.as_deref().unwrap_or("unknown error")
                );
                HomeStats::default()
            }
            Err(e) => {
                tracing::error!("Error fetching stats: {}", e);
                HomeStats::default()
            }
        };

        self.loading = false;
        &self.stats
    }
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}
