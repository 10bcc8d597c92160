use std::time::Duration;

use engine::{Error, LogProgress};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helper::*;

#[tokio::test]
async fn test_single_leg_adjusts_both_endpoints_and_has_zero_layover() {
    let helper = helper(vec![alpha(), bravo()]).await;
    mock_offset(&helper.mock_server, &alpha(), 7200, 0).await;
    mock_offset(&helper.mock_server, &bravo(), 3600, 7200).await;

    // Departs 10:00 at UTC+2, arrives 18:30 the same day at UTC+3.
    let itinerary = itinerary(vec![leg(
        ("AAA — Alpha Airport", "2019-06-01", "10:00:00"),
        ("BBB — Bravo Airport", "2019-06-01", "18:30:00"),
    )]);

    let summary = helper
        .calculator
        .calculate(itinerary, &LogProgress)
        .await
        .unwrap();

    assert_eq!(7.5, summary.flight_hours);
    assert_eq!(0.0, summary.layover_hours);
    assert!(!summary.is_implausible());
    assert!(!summary.has_unresolved_airports());
}

#[tokio::test]
async fn test_layover_is_local_wall_clock_time_between_legs() {
    let helper = helper(vec![alpha(), bravo()]).await;
    mock_zero_offsets(&helper.mock_server).await;

    let itinerary = itinerary(vec![
        leg(
            ("AAA — Alpha Airport", "2019-06-01", "08:00:00"),
            ("BBB — Bravo Airport", "2019-06-01", "12:00:00"),
        ),
        leg(
            ("BBB — Bravo Airport", "2019-06-01", "13:30:00"),
            ("AAA — Alpha Airport", "2019-06-01", "16:00:00"),
        ),
    ]);

    let summary = helper
        .calculator
        .calculate(itinerary, &LogProgress)
        .await
        .unwrap();

    assert_eq!(6.5, summary.flight_hours);
    assert_eq!(1.5, summary.layover_hours);
    assert_eq!(8.0, summary.trip_hours());
}

#[tokio::test]
async fn test_date_rollover_leg_counts_full_days() {
    let helper = helper(vec![alpha(), bravo()]).await;
    mock_zero_offsets(&helper.mock_server).await;

    let itinerary = itinerary(vec![leg(
        ("AAA — Alpha Airport", "2019-06-01", "23:00:00"),
        ("BBB — Bravo Airport", "2019-06-02", "01:00:00"),
    )]);

    let summary = helper
        .calculator
        .calculate(itinerary, &LogProgress)
        .await
        .unwrap();

    assert_eq!(2.0, summary.flight_hours);
}

#[tokio::test]
async fn test_shared_offset_cancels_out_of_flight_time() {
    let legs = || {
        itinerary(vec![leg(
            ("AAA — Alpha Airport", "2019-06-01", "10:00:00"),
            ("BBB — Bravo Airport", "2019-06-01", "16:30:00"),
        )])
    };

    let zero = helper(vec![alpha(), bravo()]).await;
    mock_zero_offsets(&zero.mock_server).await;

    let shifted = helper(vec![alpha(), bravo()]).await;
    mock_offset(&shifted.mock_server, &alpha(), 39600, 0).await;
    mock_offset(&shifted.mock_server, &bravo(), 39600, 0).await;

    let zero_summary = zero.calculator.calculate(legs(), &LogProgress).await.unwrap();
    let shifted_summary = shifted
        .calculator
        .calculate(legs(), &LogProgress)
        .await
        .unwrap();

    assert_eq!(6.5, zero_summary.flight_hours);
    assert_eq!(zero_summary.flight_hours, shifted_summary.flight_hours);
}

#[tokio::test]
async fn test_lookup_failure_fails_the_whole_calculation() {
    let helper = helper(vec![alpha(), bravo()]).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&helper.mock_server)
        .await;

    let itinerary = itinerary(vec![leg(
        ("AAA — Alpha Airport", "2019-06-01", "10:00:00"),
        ("BBB — Bravo Airport", "2019-06-01", "16:30:00"),
    )]);

    let error = helper
        .calculator
        .calculate(itinerary, &LogProgress)
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Lookup { .. }));
}

#[tokio::test]
async fn test_slow_resolution_times_out_the_leg() {
    let helper = helper(vec![alpha(), bravo()]).await;
    Mock::given(method("GET"))
        .respond_with(offset_response(0, 0).set_delay(Duration::from_secs(60)))
        .mount(&helper.mock_server)
        .await;

    let calculator = helper
        .calculator
        .with_leg_timeout(Duration::from_millis(100));

    let itinerary = itinerary(vec![leg(
        ("AAA — Alpha Airport", "2019-06-01", "10:00:00"),
        ("BBB — Bravo Airport", "2019-06-01", "16:30:00"),
    )]);

    let error = calculator
        .calculate(itinerary, &LogProgress)
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Timeout { .. }));
}

#[tokio::test]
async fn test_unmatched_airport_degrades_to_unadjusted_times() {
    let helper = helper(vec![alpha()]).await;
    Mock::given(method("GET"))
        .respond_with(offset_response(0, 0))
        .expect(0)
        .mount(&helper.mock_server)
        .await;

    let itinerary = itinerary(vec![leg(
        ("AAA — Alpha Airport", "2019-06-01", "10:00:00"),
        ("ZZZ — Zulu Airport", "2019-06-01", "13:00:00"),
    )]);

    let summary = helper
        .calculator
        .calculate(itinerary, &LogProgress)
        .await
        .unwrap();

    assert_eq!(3.0, summary.flight_hours);
    assert!(summary.has_unresolved_airports());
    assert_eq!(
        vec!["ZZZ — Zulu Airport".to_string()],
        summary.unresolved_airports,
    );
}

#[tokio::test]
async fn test_negative_total_is_a_tagged_success() {
    let helper = helper(vec![alpha(), bravo()]).await;
    mock_zero_offsets(&helper.mock_server).await;

    // Reversed dates: arrival a day before departure.
    let itinerary = itinerary(vec![leg(
        ("AAA — Alpha Airport", "2019-06-02", "10:00:00"),
        ("BBB — Bravo Airport", "2019-06-01", "10:00:00"),
    )]);

    let summary = helper
        .calculator
        .calculate(itinerary, &LogProgress)
        .await
        .unwrap();

    assert_eq!(-24.0, summary.flight_hours);
    assert!(summary.is_implausible());
}

#[tokio::test]
async fn test_progress_ticks_cover_each_leg_and_end_at_the_maximum() {
    let helper = helper(vec![alpha(), bravo()]).await;
    mock_zero_offsets(&helper.mock_server).await;

    let itinerary = itinerary(vec![
        leg(
            ("AAA — Alpha Airport", "2019-06-01", "08:00:00"),
            ("BBB — Bravo Airport", "2019-06-01", "12:00:00"),
        ),
        leg(
            ("BBB — Bravo Airport", "2019-06-01", "13:30:00"),
            ("AAA — Alpha Airport", "2019-06-01", "16:00:00"),
        ),
    ]);

    let mut handle = helper.calculator.spawn(itinerary);

    let mut ticks = Vec::new();
    while let Some(tick) = handle.progress.recv().await {
        ticks.push(tick);
    }
    let summary = handle.result.await.unwrap().unwrap();

    let expected: Vec<u32> = (0..=10).chain(10..=20).collect();
    assert_eq!(expected, ticks);
    assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
    assert!(!summary.is_implausible());
}

#[tokio::test]
async fn test_concurrent_calculations_keep_their_offsets_apart() {
    let helper = helper(vec![alpha(), bravo()]).await;
    mock_offset(&helper.mock_server, &alpha(), 7200, 0).await;
    mock_offset(&helper.mock_server, &bravo(), 3600, 7200).await;

    let other_server = MockServer::start().await;
    mock_zero_offsets(&other_server).await;
    let other_calculator = calculator_for(&other_server, helper.directory.clone());

    let legs = || {
        itinerary(vec![leg(
            ("AAA — Alpha Airport", "2019-06-01", "10:00:00"),
            ("BBB — Bravo Airport", "2019-06-01", "18:30:00"),
        )])
    };

    let (shifted, zero) = tokio::join!(
        helper.calculator.calculate(legs(), &LogProgress),
        other_calculator.calculate(legs(), &LogProgress),
    );

    assert_eq!(7.5, shifted.unwrap().flight_hours);
    assert_eq!(8.5, zero.unwrap().flight_hours);
}

#[tokio::test]
async fn test_same_airport_is_resolved_once_per_timestamp() {
    let helper = helper(vec![alpha(), bravo(), charlie()]).await;

    let first = leg(
        ("AAA — Alpha Airport", "2019-03-30", "10:00:00"),
        ("BBB — Bravo Airport", "2019-03-30", "20:00:00"),
    );
    let second = leg(
        ("BBB — Bravo Airport", "2019-03-31", "09:00:00"),
        ("CCC — Charlie Airport", "2019-03-31", "12:00:00"),
    );

    mock_offset(&helper.mock_server, &alpha(), 0, 0).await;
    mock_offset(&helper.mock_server, &charlie(), 10800, 0).await;

    // Bravo sits on a DST transition between the two instants: winter
    // offset at the first leg's arrival, summer offset the next morning.
    Mock::given(method("GET"))
        .and(query_param(
            "location",
            bravo().coordinates.location_param(),
        ))
        .and(query_param(
            "timestamp",
            first.arrival.resolver_timestamp().to_string(),
        ))
        .respond_with(offset_response(3600, 0))
        .expect(1)
        .mount(&helper.mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param(
            "location",
            bravo().coordinates.location_param(),
        ))
        .and(query_param(
            "timestamp",
            second.departure.resolver_timestamp().to_string(),
        ))
        .respond_with(offset_response(3600, 3600))
        .expect(1)
        .mount(&helper.mock_server)
        .await;

    let summary = helper
        .calculator
        .calculate(itinerary(vec![first, second]), &LogProgress)
        .await
        .unwrap();

    assert_eq!(11.0, summary.flight_hours);
    assert_eq!(13.0, summary.layover_hours);
}
