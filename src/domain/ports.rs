use crate::core::store::RecordStore;
use crate::domain::model::{PieChart, ScatterChart};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where launch records come from at startup.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn load(&self) -> Result<RecordStore>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Pie,
    Scatter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartUpdate {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl ChartUpdate {
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Pie(_) => ChartKind::Pie,
            Self::Scatter(_) => ChartKind::Scatter,
        }
    }
}

/// A chart component that redraws itself when the dashboard pushes new data.
pub trait ChartSurface: Send {
    fn rebind(&mut self, update: &ChartUpdate);
}
