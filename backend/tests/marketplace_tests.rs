//! Dashboard stats, reviews, reports, nearby search and messaging

mod common;

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use servicehub_server::booking::{Booking, BookingStatus};
    use servicehub_server::catalog::NearbyQuery;
    use servicehub_server::dashboard::DashboardStats;
    use servicehub_server::error::ApiError;
    use servicehub_server::message::SendMessageRequest;
    use servicehub_server::models::User;
    use servicehub_server::payment::{signature, CreateOrderRequest, VerifyPaymentRequest};
    use servicehub_server::report::{CreateReportRequest, ReportStatus, ReportType};
    use servicehub_server::review::CreateReviewRequest;

    use crate::common::{Harness, KEY_SECRET};

    // Pune city centre; one degree of latitude is ~111.19 km
    const ORIGIN: (f64, f64) = (18.5204, 73.8567);
    const KM_PER_DEG_LAT: f64 = 111.194_93;

    async fn complete(h: &Harness, provider: &User, booking: &Booking) {
        let svc = &h.state.booking_service;
        for next in [
            BookingStatus::Confirmed,
            BookingStatus::InProgress,
            BookingStatus::Completed,
        ] {
            svc.transition_status(provider.id, booking.id, next)
                .await
                .unwrap();
        }
    }

    async fn pay(h: &Harness, booking: &Booking, amount: i64) {
        let svc = &h.state.payment_service;
        let order = svc
            .create_order(CreateOrderRequest {
                booking_id: booking.id,
                amount,
            })
            .await
            .unwrap();
        let payment_id = format!("pay_{}", booking.id.simple());
        svc.verify_payment(VerifyPaymentRequest {
            signature: signature::sign(KEY_SECRET, &order.gateway_order_id, &payment_id).unwrap(),
            order_id: order.gateway_order_id,
            payment_id,
        })
        .await
        .unwrap();
    }

    async fn review(h: &Harness, consumer: &User, booking: &Booking, rating: i32) {
        h.state
            .review_service
            .create_review(
                consumer.id,
                CreateReviewRequest {
                    booking_id: booking.id,
                    rating,
                    comment: None,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_consumer_and_provider_stats() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;

        // completed and paid: spend is the captured amount
        let paid = h.booking(&consumer, &provider, 20_000).await;
        complete(&h, &provider, &paid).await;
        pay(&h, &paid, 22_000).await;

        // confirmed, unpaid: price plus 10% fee is pending
        let confirmed = h.booking(&consumer, &provider, 10_000).await;
        h.state
            .booking_service
            .transition_status(provider.id, confirmed.id, BookingStatus::Confirmed)
            .await
            .unwrap();

        // completed, unpaid: provider share is pending
        let unpaid = h.booking(&consumer, &provider, 5_000).await;
        complete(&h, &provider, &unpaid).await;

        // pending bookings count but carry no money
        h.booking(&consumer, &provider, 99_900).await;

        let consumer_stats = h.state.dashboard_service.consumer_stats(consumer.id).await.unwrap();
        assert_eq!(consumer_stats.counts.total_bookings, 4);
        assert_eq!(consumer_stats.counts.pending_bookings, 1);
        assert_eq!(consumer_stats.counts.confirmed_bookings, 1);
        assert_eq!(consumer_stats.counts.completed_bookings, 2);
        assert_eq!(consumer_stats.total_spent, 22_000);
        assert_eq!(consumer_stats.pending_payments, 11_000 + 5_500);

        let provider_stats = h.state.dashboard_service.provider_stats(provider.id).await.unwrap();
        assert_eq!(provider_stats.counts.total_bookings, 4);
        assert_eq!(provider_stats.total_earnings, 18_000);
        assert_eq!(provider_stats.pending_payments, 4_500);
        assert_eq!(provider_stats.total_reviews, 0);
        assert_eq!(provider_stats.average_rating, 0.0);
    }

    #[tokio::test]
    async fn test_stats_dispatch_on_role() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;

        assert!(matches!(
            h.state.dashboard_service.stats_for(&consumer).await.unwrap(),
            DashboardStats::Consumer(_)
        ));
        assert!(matches!(
            h.state.dashboard_service.stats_for(&provider).await.unwrap(),
            DashboardStats::Provider(_)
        ));
    }

    #[tokio::test]
    async fn test_provider_rating_average() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;

        for rating in [5, 3, 4] {
            let booking = h.booking(&consumer, &provider, 10_000).await;
            complete(&h, &provider, &booking).await;
            review(&h, &consumer, &booking, rating).await;
        }

        let rating = h.state.review_service.provider_rating(provider.id).await.unwrap();
        assert_eq!(rating.total_reviews, 3);
        assert!((rating.average_rating - 4.0).abs() < f64::EPSILON);

        let stats = h.state.dashboard_service.provider_stats(provider.id).await.unwrap();
        assert_eq!(stats.total_reviews, 3);

        let empty = h
            .state
            .review_service
            .provider_rating(Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(empty.total_reviews, 0);
        assert_eq!(empty.average_rating, 0.0);
    }

    #[tokio::test]
    async fn test_review_rules() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let booking = h.booking(&consumer, &provider, 10_000).await;
        let svc = &h.state.review_service;
        let request = |rating| CreateReviewRequest {
            booking_id: booking.id,
            rating,
            comment: Some("Quick and tidy".to_string()),
        };

        assert!(matches!(
            svc.create_review(consumer.id, request(5)).await,
            Err(ApiError::InvalidState(_))
        ));

        complete(&h, &provider, &booking).await;

        assert!(matches!(
            svc.create_review(provider.id, request(5)).await,
            Err(ApiError::Forbidden(_))
        ));
        assert!(matches!(
            svc.create_review(consumer.id, request(6)).await,
            Err(ApiError::ValidationError(_))
        ));

        let review = svc.create_review(consumer.id, request(5)).await.unwrap();
        assert_eq!(review.provider_id, provider.id);

        assert!(matches!(
            svc.create_review(consumer.id, request(4)).await,
            Err(ApiError::Conflict(_))
        ));
        assert_eq!(svc.provider_reviews(provider.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_report_rules() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let booking = h.booking(&consumer, &provider, 10_000).await;
        let svc = &h.state.report_service;
        let request = |booking_id| CreateReportRequest {
            reported_user_id: provider.id,
            report_type: ReportType::Abuse,
            description: "Rude on arrival".to_string(),
            booking_id,
        };

        let report = svc.create_report(consumer.id, request(Some(booking.id))).await.unwrap();
        assert_eq!(report.status, ReportStatus::Pending);
        assert!(report.resolved_at.is_none());

        assert!(matches!(
            svc.create_report(consumer.id, request(Some(booking.id))).await,
            Err(ApiError::Conflict(_))
        ));
        assert!(matches!(
            svc.create_report(consumer.id, request(Some(Uuid::new_v4()))).await,
            Err(ApiError::NotFound(_))
        ));

        // reports without a booking are not deduplicated
        svc.create_report(consumer.id, request(None)).await.unwrap();
        svc.create_report(consumer.id, request(None)).await.unwrap();

        assert_eq!(svc.my_reports(consumer.id).await.unwrap().len(), 3);
        assert!(svc.my_reports(provider.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_nearby_search_uses_query_radius() {
        let h = Harness::new();
        let provider = h.provider().await;

        let near = h
            .listing(&provider, 10_000, Some((ORIGIN.0 + 3.0 / KM_PER_DEG_LAT, ORIGIN.1)))
            .await;
        let far = h
            .listing(&provider, 10_000, Some((ORIGIN.0 + 6.0 / KM_PER_DEG_LAT, ORIGIN.1)))
            .await;
        h.listing(&provider, 10_000, None).await;

        let query = |radius| NearbyQuery {
            lat: ORIGIN.0,
            lon: ORIGIN.1,
            radius,
            category: None,
        };

        let found = h.state.catalog_service.search_nearby(query(None)).await.unwrap();
        let ids: Vec<Uuid> = found.iter().map(|s| s.listing.id).collect();
        assert_eq!(ids, vec![near]);
        assert_eq!(found[0].provider_name.as_deref(), Some(provider.name.as_str()));

        let found = h.state.catalog_service.search_nearby(query(Some(10.0))).await.unwrap();
        let mut ids: Vec<Uuid> = found.iter().map(|s| s.listing.id).collect();
        ids.sort();
        let mut expected = vec![near, far];
        expected.sort();
        assert_eq!(ids, expected);

        let bad = NearbyQuery {
            lat: 91.0,
            lon: 0.0,
            radius: None,
            category: None,
        };
        assert!(matches!(
            h.state.catalog_service.search_nearby(bad).await,
            Err(ApiError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_only_owner_deletes_listing() {
        let h = Harness::new();
        let owner = h.provider().await;
        let other = h.provider().await;
        let id = h.listing(&owner, 10_000, None).await;

        assert!(matches!(
            h.state.catalog_service.delete_service(other.id, id).await,
            Err(ApiError::Forbidden(_))
        ));
        h.state.catalog_service.delete_service(owner.id, id).await.unwrap();
        assert!(matches!(
            h.state.catalog_service.get_service(id).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_messages_and_unread_count() {
        let h = Harness::new();
        let consumer = h.consumer().await;
        let provider = h.provider().await;
        let svc = &h.state.message_service;
        let send = |receiver_id, content: &str| SendMessageRequest {
            receiver_id,
            content: content.to_string(),
        };

        let first = svc
            .send_message(consumer.id, send(provider.id, "Are you free Monday?"))
            .await
            .unwrap();
        assert_eq!(first.sender_name, consumer.name);
        assert_eq!(first.receiver_name, provider.name);
        svc.send_message(provider.id, send(consumer.id, "Yes, 10:30 works"))
            .await
            .unwrap();

        let conversation = svc.conversation(consumer.id, provider.id).await.unwrap();
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation[0].message.id, first.message.id);

        assert_eq!(svc.unread_count(provider.id).await.unwrap(), 1);
        assert!(matches!(
            svc.mark_read(consumer.id, first.message.id).await,
            Err(ApiError::Forbidden(_))
        ));
        svc.mark_read(provider.id, first.message.id).await.unwrap();
        assert_eq!(svc.unread_count(provider.id).await.unwrap(), 0);

        assert!(matches!(
            svc.send_message(consumer.id, send(Uuid::new_v4(), "hello")).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
