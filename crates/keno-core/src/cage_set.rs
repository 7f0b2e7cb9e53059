//! The fixed list of cages served together.

use crate::cage::Cage;
use crate::config::CageConfig;
use crate::error::KenoResult;
use std::fmt;

/// Capacities of the standard Keno cages.
pub const KENO_CAPACITIES: [usize; 2] = [100, 200];

/// Ordered cages. The order is fixed at construction and is the order in
/// which picks are reported.
#[derive(Debug)]
pub struct CageSet {
    cages: Vec<Cage>,
}

impl CageSet {
    pub fn new(configs: impl IntoIterator<Item = CageConfig>) -> KenoResult<Self> {
        let cages = configs
            .into_iter()
            .map(Cage::new)
            .collect::<KenoResult<Vec<_>>>()?;
        Ok(Self { cages })
    }

    /// The standard pair of cages (100 and 200 balls) with default tuning.
    pub fn keno() -> KenoResult<Self> {
        Self::new(KENO_CAPACITIES.into_iter().map(CageConfig::with_capacity))
    }

    pub fn cages(&self) -> &[Cage] {
        &self.cages
    }

    pub fn len(&self) -> usize {
        self.cages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cages.is_empty()
    }

    /// Pick from every cage in order, one line per cage.
    pub async fn handle_pick_request<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for cage in &self.cages {
            cage.pick_or_init_into(out).await?;
        }
        Ok(())
    }

    /// Same as [`handle_pick_request`](Self::handle_pick_request), collected into a string.
    pub async fn render_picks(&self) -> String {
        let mut body = String::new();
        // Writing into a String cannot fail.
        let _ = self.handle_pick_request(&mut body).await;
        body
    }

    pub async fn shutdown(&self) {
        for cage in &self.cages {
            cage.shutdown().await;
        }
    }
}
