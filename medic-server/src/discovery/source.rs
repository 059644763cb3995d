//! Facility sources consumed by the discovery pipeline.

use std::future::Future;

use crate::overpass::{
    FacilityBatch, FacilityQuery, MockOverpassSource, OverpassClient, OverpassError,
};

/// Trait for answering facility radius queries.
///
/// This abstraction allows the pipeline to be tested with mock data.
pub trait FacilitySource: Send + Sync {
    /// Find facilities matching the query.
    ///
    /// A successful batch may be empty; failure means no endpoint answered.
    fn find_facilities(
        &self,
        query: &FacilityQuery,
    ) -> impl Future<Output = Result<FacilityBatch, OverpassError>> + Send;
}

impl FacilitySource for OverpassClient {
    fn find_facilities(
        &self,
        query: &FacilityQuery,
    ) -> impl Future<Output = Result<FacilityBatch, OverpassError>> + Send {
        OverpassClient::find_facilities(self, query)
    }
}

impl FacilitySource for MockOverpassSource {
    fn find_facilities(
        &self,
        query: &FacilityQuery,
    ) -> impl Future<Output = Result<FacilityBatch, OverpassError>> + Send {
        MockOverpassSource::find_facilities(self, query)
    }
}

/// Source selected at startup: live Overpass or a local fixture.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Overpass(OverpassClient),
    Fixture(MockOverpassSource),
}

impl FacilitySource for ConfiguredSource {
    fn find_facilities(
        &self,
        query: &FacilityQuery,
    ) -> impl Future<Output = Result<FacilityBatch, OverpassError>> + Send {
        async move {
            match self {
                ConfiguredSource::Overpass(client) => client.find_facilities(query).await,
                ConfiguredSource::Fixture(fixture) => fixture.find_facilities(query).await,
            }
        }
    }
}
