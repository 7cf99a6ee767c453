//! Integration Tests - End-to-end Quoting Component Testing
//!
//! Tests the interaction between usecases, ports, and mock adapters.
//! Uses mockall for trait mocking and tokio::test for async tests.

use std::sync::Arc;

use mockall::mock;
use mockall::predicate::*;
use rust_decimal_macros::dec;

use freight_quoter::domain::entity::{
    Port, PortKind, PortSource, Quote, RateCard, ServiceKind, TransitTime, TransportMode,
};
use freight_quoter::domain::error::{DistanceError, QuoteError};
use freight_quoter::domain::geo::Coordinates;
use freight_quoter::ports::geocoder::{GeocodeOutcome, Geocoder, Place};
use freight_quoter::ports::stores::{
    PortPatch, PortStore, QuotePage, QuoteStore, RateCardPatch, RateCardStore,
};
use freight_quoter::usecases::port_finder::{PortFinder, PortMatch};
use freight_quoter::usecases::quote_engine::{
    QuoteDefaults, QuoteEngine, QuotePatch, QuoteRequest,
};

// ---- Mock Definitions ----

mock! {
    pub Geo {}

    #[async_trait::async_trait]
    impl Geocoder for Geo {
        async fn geocode(&self, query: &str, limit: usize) -> GeocodeOutcome;
        async fn is_healthy(&self) -> bool;
    }
}

mock! {
    pub Rates {}

    #[async_trait::async_trait]
    impl RateCardStore for Rates {
        async fn find_active(
            &self,
            country: &str,
            mode: TransportMode,
            service: ServiceKind,
        ) -> Result<Option<RateCard>, QuoteError>;
        async fn list_active(&self) -> Result<Vec<RateCard>, QuoteError>;
        async fn insert(&self, card: RateCard) -> Result<String, QuoteError>;
        async fn update(&self, id: &str, patch: RateCardPatch) -> Result<RateCard, QuoteError>;
        async fn deactivate(&self, id: &str) -> Result<(), QuoteError>;
        async fn is_healthy(&self) -> bool;
    }
}

mock! {
    pub Quotes {}

    #[async_trait::async_trait]
    impl QuoteStore for Quotes {
        async fn insert(&self, quote: Quote) -> Result<String, QuoteError>;
        async fn get(&self, id: &str) -> Result<Option<Quote>, QuoteError>;
        async fn replace(
            &self,
            id: &str,
            expected_version: u64,
            quote: Quote,
        ) -> Result<Quote, QuoteError>;
        async fn history(&self, page: usize, limit: usize) -> Result<QuotePage, QuoteError>;
        async fn is_healthy(&self) -> bool;
    }
}

mock! {
    pub Ports {}

    #[async_trait::async_trait]
    impl PortStore for Ports {
        async fn search(&self, query: &str, limit: usize) -> Result<Vec<Port>, QuoteError>;
        async fn list_active(&self) -> Result<Vec<Port>, QuoteError>;
        async fn get(&self, id: &str) -> Result<Option<Port>, QuoteError>;
        async fn insert(&self, port: Port) -> Result<String, QuoteError>;
        async fn update(&self, id: &str, patch: PortPatch) -> Result<Port, QuoteError>;
        async fn deactivate(&self, id: &str) -> Result<(), QuoteError>;
        async fn is_healthy(&self) -> bool;
    }
}

// ---- Fixtures ----

fn defaults() -> QuoteDefaults {
    QuoteDefaults {
        country: "KH".to_string(),
        mode: TransportMode::Road,
    }
}

fn road_card() -> RateCard {
    RateCard {
        id: "rc_road".to_string(),
        country: "KH".to_string(),
        mode: TransportMode::Road,
        service: ServiceKind::LocalCharge,
        trucking: dec!(120.00),
        docs: dec!(35.00),
        freight: dec!(0),
        othc: dec!(65.00),
        minimum_charge: dec!(100.00),
        currency: "USD".to_string(),
        transit_time: None,
        active: true,
        created_at: chrono::Utc::now(),
        updated_at: None,
    }
}

fn sea_card() -> RateCard {
    RateCard {
        id: "rc_sea".to_string(),
        country: "KH".to_string(),
        mode: TransportMode::Sea,
        service: ServiceKind::Freight,
        trucking: dec!(0),
        docs: dec!(0),
        freight: dec!(900.00),
        othc: dec!(65.00),
        minimum_charge: dec!(0),
        currency: "USD".to_string(),
        transit_time: None,
        active: true,
        created_at: chrono::Utc::now(),
        updated_at: None,
    }
}

fn place(name: &str, lat: f64, lon: f64) -> Place {
    Place {
        display_name: name.to_string(),
        coordinates: Coordinates { lat, lon },
    }
}

fn request() -> QuoteRequest {
    QuoteRequest {
        origin: "Phnom Penh".to_string(),
        destination: "Sihanoukville".to_string(),
        commodity: "garments".to_string(),
        container_max_weight: 24_000.0,
        container_quantity: 2,
        country: None,
        mode: None,
    }
}

// ---- Quote generation ----

#[tokio::test]
async fn test_road_quote_end_to_end() {
    let mut geo = MockGeo::new();
    geo.expect_geocode()
        .with(eq("Phnom Penh"), eq(1))
        .returning(|_, _| GeocodeOutcome::Found(vec![place("Phnom Penh", 11.5564, 104.9282)]));
    geo.expect_geocode()
        .with(eq("Sihanoukville"), eq(1))
        .returning(|_, _| GeocodeOutcome::Found(vec![place("Sihanoukville", 10.6278, 103.5222)]));

    let mut rates = MockRates::new();
    rates
        .expect_find_active()
        .with(eq("KH"), eq(TransportMode::Road), eq(ServiceKind::LocalCharge))
        .returning(|_, _, _| Ok(Some(road_card())));

    let mut quotes = MockQuotes::new();
    quotes
        .expect_insert()
        .times(1)
        .returning(|q| Ok(q.id));

    let engine = QuoteEngine::new(
        Arc::new(geo),
        Arc::new(rates),
        Arc::new(quotes),
        defaults(),
    );

    let quote = engine.generate(request()).await.unwrap();

    assert_eq!(quote.mode, TransportMode::Road);
    assert_eq!(quote.chargeable_weight, 48_000.0);
    let km = quote.distance_km.unwrap();
    assert!((km - 184.0).abs() < 5.0, "unexpected distance {km}");

    let line = &quote.quotes[&ServiceKind::LocalCharge];
    assert_eq!(line.price, dec!(220.00));
    assert!(!line.breakdown.minimum_applied);
    assert_eq!(line.eta, "1 day"); // ~184 km falls in the 150–400 band
    assert_eq!(quote.version, 1);
    assert!(!quote.converted);
}

#[tokio::test]
async fn test_sea_quote_skips_geocoding() {
    // No geocode expectations: any call would panic the mock.
    let geo = MockGeo::new();

    let mut rates = MockRates::new();
    rates
        .expect_find_active()
        .with(eq("KH"), eq(TransportMode::Sea), eq(ServiceKind::Freight))
        .returning(|_, _, _| Ok(Some(sea_card())));

    let mut quotes = MockQuotes::new();
    quotes.expect_insert().returning(|q| Ok(q.id));

    let engine = QuoteEngine::new(
        Arc::new(geo),
        Arc::new(rates),
        Arc::new(quotes),
        defaults(),
    );

    let mut req = request();
    req.mode = Some("Sea".to_string());
    let quote = engine.generate(req).await.unwrap();

    assert_eq!(quote.mode, TransportMode::Sea);
    assert!(quote.distance_km.is_none());

    let line = &quote.quotes[&ServiceKind::Freight];
    assert_eq!(line.price, dec!(1865.00)); // 2 × 900 + 65
    assert_eq!(line.eta, "5–10 days");
}

#[tokio::test]
async fn test_transit_time_override_reaches_the_quote() {
    let geo = MockGeo::new();

    let mut rates = MockRates::new();
    rates.expect_find_active().returning(|_, _, _| {
        let mut card = sea_card();
        card.transit_time = Some(TransitTime {
            min: 7,
            max: 12,
            unit: "days".to_string(),
        });
        Ok(Some(card))
    });

    let mut quotes = MockQuotes::new();
    quotes.expect_insert().returning(|q| Ok(q.id));

    let engine = QuoteEngine::new(
        Arc::new(geo),
        Arc::new(rates),
        Arc::new(quotes),
        defaults(),
    );

    let mut req = request();
    req.mode = Some("sea".to_string());
    let quote = engine.generate(req).await.unwrap();
    assert_eq!(quote.quotes[&ServiceKind::Freight].eta, "7–12 days");
}

#[tokio::test]
async fn test_validation_failure_makes_no_external_calls() {
    // All mocks are strict: any call would fail the test.
    let engine = QuoteEngine::new(
        Arc::new(MockGeo::new()),
        Arc::new(MockRates::new()),
        Arc::new(MockQuotes::new()),
        defaults(),
    );

    let mut req = request();
    req.commodity = String::new();
    let err = engine.generate(req).await.unwrap_err();
    assert_eq!(err.to_string(), "Missing field: commodity");
}

#[tokio::test]
async fn test_unsupported_mode_fails_before_pricing() {
    let engine = QuoteEngine::new(
        Arc::new(MockGeo::new()),
        Arc::new(MockRates::new()),
        Arc::new(MockQuotes::new()),
        defaults(),
    );

    let mut req = request();
    req.mode = Some("air".to_string());
    let err = engine.generate(req).await.unwrap_err();
    assert!(matches!(err, QuoteError::UnsupportedMode(m) if m == "air"));
}

#[tokio::test]
async fn test_unresolvable_origin_is_terminal_for_road() {
    let mut geo = MockGeo::new();
    geo.expect_geocode()
        .with(eq("Phnom Penh"), eq(1))
        .returning(|_, _| GeocodeOutcome::NoMatch);
    geo.expect_geocode()
        .with(eq("Sihanoukville"), eq(1))
        .returning(|_, _| GeocodeOutcome::Found(vec![place("Sihanoukville", 10.6, 103.5)]));

    let engine = QuoteEngine::new(
        Arc::new(geo),
        Arc::new(MockRates::new()),
        Arc::new(MockQuotes::new()),
        defaults(),
    );

    let err = engine.generate(request()).await.unwrap_err();
    assert_eq!(err.to_string(), "Unable to calculate distance");
    assert!(matches!(
        err,
        QuoteError::DistanceUnavailable(DistanceError::PlaceNotFound(p)) if p == "Phnom Penh"
    ));
}

#[tokio::test]
async fn test_geocoder_outage_is_distinguishable_from_no_match() {
    let mut geo = MockGeo::new();
    geo.expect_geocode()
        .returning(|_, _| GeocodeOutcome::Unavailable);

    let engine = QuoteEngine::new(
        Arc::new(geo),
        Arc::new(MockRates::new()),
        Arc::new(MockQuotes::new()),
        defaults(),
    );

    let err = engine.generate(request()).await.unwrap_err();
    assert!(matches!(
        err,
        QuoteError::DistanceUnavailable(DistanceError::ServiceUnavailable)
    ));
}

#[tokio::test]
async fn test_missing_rate_card_yields_no_available_rates() {
    let mut geo = MockGeo::new();
    geo.expect_geocode()
        .returning(|q, _| GeocodeOutcome::Found(vec![place(q, 11.5, 104.9)]));

    let mut rates = MockRates::new();
    rates.expect_find_active().returning(|_, _, _| Ok(None));

    // Nothing must be persisted on failure.
    let engine = QuoteEngine::new(
        Arc::new(geo),
        Arc::new(rates),
        Arc::new(MockQuotes::new()),
        defaults(),
    );

    let err = engine.generate(request()).await.unwrap_err();
    assert!(matches!(err, QuoteError::NoAvailableRates));
}

// ---- Quote revision ----

fn stored_quote(engine_quote_version: u64) -> Quote {
    Quote {
        id: "q_1".to_string(),
        origin: "Phnom Penh".to_string(),
        destination: "Sihanoukville".to_string(),
        commodity: "garments".to_string(),
        mode: TransportMode::Sea,
        country: "KH".to_string(),
        distance_km: None,
        container_max_weight: 24_000.0,
        container_quantity: 2,
        chargeable_weight: 48_000.0,
        quotes: Default::default(),
        created_at: chrono::Utc::now(),
        updated_at: None,
        converted: false,
        version: engine_quote_version,
    }
}

#[tokio::test]
async fn test_update_recomputes_and_bumps_version() {
    let geo = MockGeo::new();

    let mut rates = MockRates::new();
    rates
        .expect_find_active()
        .with(eq("KH"), eq(TransportMode::Sea), eq(ServiceKind::Freight))
        .returning(|_, _, _| Ok(Some(sea_card())));

    let mut quotes = MockQuotes::new();
    quotes
        .expect_get()
        .with(eq("q_1"))
        .returning(|_| Ok(Some(stored_quote(3))));
    quotes
        .expect_replace()
        .withf(|id, expected, revised| {
            id == "q_1" && *expected == 3 && revised.version == 4
        })
        .returning(|_, _, revised| Ok(revised));

    let engine = QuoteEngine::new(
        Arc::new(geo),
        Arc::new(rates),
        Arc::new(quotes),
        defaults(),
    );

    let patch = QuotePatch {
        container_quantity: Some(5),
        ..QuotePatch::default()
    };
    let revised = engine.update("q_1", patch).await.unwrap();

    assert_eq!(revised.container_quantity, 5);
    assert_eq!(revised.chargeable_weight, 120_000.0);
    assert_eq!(revised.version, 4);
    assert!(revised.updated_at.is_some());
    // 5 × 900 + 65, fully recomputed from the merged inputs.
    assert_eq!(revised.quotes[&ServiceKind::Freight].price, dec!(4565.00));
}

#[tokio::test]
async fn test_update_unknown_quote_is_not_found() {
    let mut quotes = MockQuotes::new();
    quotes.expect_get().returning(|_| Ok(None));

    let engine = QuoteEngine::new(
        Arc::new(MockGeo::new()),
        Arc::new(MockRates::new()),
        Arc::new(quotes),
        defaults(),
    );

    let patch = QuotePatch {
        commodity: Some("rice".to_string()),
        ..QuotePatch::default()
    };
    let err = engine.update("missing", patch).await.unwrap_err();
    assert!(matches!(err, QuoteError::NotFound { .. }));
}

#[tokio::test]
async fn test_update_surfaces_version_conflict() {
    let mut rates = MockRates::new();
    rates
        .expect_find_active()
        .returning(|_, _, _| Ok(Some(sea_card())));

    let mut quotes = MockQuotes::new();
    quotes
        .expect_get()
        .returning(|_| Ok(Some(stored_quote(3))));
    quotes
        .expect_replace()
        .returning(|_, _, _| Err(QuoteError::Conflict));

    let engine = QuoteEngine::new(
        Arc::new(MockGeo::new()),
        Arc::new(rates),
        Arc::new(quotes),
        defaults(),
    );

    let patch = QuotePatch {
        container_quantity: Some(1),
        ..QuotePatch::default()
    };
    let err = engine.update("q_1", patch).await.unwrap_err();
    assert!(matches!(err, QuoteError::Conflict));
}

// ---- Port search ----

fn directory_port(name: &str) -> Port {
    Port {
        id: format!("p_{name}"),
        name: name.to_string(),
        code: "KHSIH".to_string(),
        country: "Cambodia".to_string(),
        city: "Sihanoukville".to_string(),
        kind: PortKind::Sea,
        lat: 10.64,
        lon: 103.51,
        source: PortSource::Manual,
        active: true,
        created_at: chrono::Utc::now(),
        updated_at: None,
        deleted_at: None,
    }
}

#[tokio::test]
async fn test_short_query_touches_nothing() {
    // Strict mocks: a store or geocoder call would fail the test.
    let finder = PortFinder::new(Arc::new(MockGeo::new()), Arc::new(MockPorts::new()));
    let hits = finder.search("s").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_local_matches_win_without_fallback() {
    let mut ports = MockPorts::new();
    ports
        .expect_search()
        .with(eq("siha"), eq(10))
        .returning(|_, _| Ok(vec![directory_port("Sihanoukville Autonomous Port")]));

    let finder = PortFinder::new(Arc::new(MockGeo::new()), Arc::new(ports));
    let hits = finder.search("siha").await.unwrap();

    assert_eq!(hits.len(), 1);
    assert!(matches!(&hits[0], PortMatch::Registered(p) if p.code == "KHSIH"));
}

#[tokio::test]
async fn test_empty_local_falls_back_to_geocoder_with_port_suffix() {
    let mut ports = MockPorts::new();
    ports.expect_search().returning(|_, _| Ok(Vec::new()));

    let mut geo = MockGeo::new();
    geo.expect_geocode()
        .with(eq("rotterdam port"), eq(5))
        .returning(|_, _| {
            GeocodeOutcome::Found(vec![place("Port of Rotterdam, Netherlands", 51.95, 4.14)])
        });

    let finder = PortFinder::new(Arc::new(geo), Arc::new(ports));
    let hits = finder.search("rotterdam").await.unwrap();

    assert_eq!(hits.len(), 1);
    assert!(matches!(
        &hits[0],
        PortMatch::External { name, .. } if name.starts_with("Port of Rotterdam")
    ));
}

#[tokio::test]
async fn test_fallback_outage_degrades_to_empty() {
    let mut ports = MockPorts::new();
    ports.expect_search().returning(|_, _| Ok(Vec::new()));

    let mut geo = MockGeo::new();
    geo.expect_geocode()
        .returning(|_, _| GeocodeOutcome::Unavailable);

    let finder = PortFinder::new(Arc::new(geo), Arc::new(ports));
    let hits = finder.search("rotterdam").await.unwrap();
    assert!(hits.is_empty());
}
