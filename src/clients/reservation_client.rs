use crate::model::{Reservation, ReservationCreate, ReservationId, ReservationStatus};
use crate::reservation_actor::ReservationError;
use async_trait::async_trait;
use resource_store::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the reservation actor.
#[derive(Clone)]
pub struct ReservationClient {
    inner: ResourceClient<Reservation>,
}

impl ReservationClient {
    pub fn new(inner: ResourceClient<Reservation>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Reservation> for ReservationClient {
    type Error = ReservationError;

    fn inner(&self) -> &ResourceClient<Reservation> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

impl ReservationClient {
    #[instrument(skip(self))]
    pub async fn book(&self, params: ReservationCreate) -> Result<ReservationId, ReservationError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation, ReservationError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, status).await?)
    }

    /// Every booking, soonest first. Dates and times are compared as entered,
    /// which matches calendar order for `YYYY-MM-DD` and `HH:MM` input.
    #[instrument(skip(self))]
    pub async fn by_date(&self) -> Result<Vec<Reservation>, ReservationError> {
        let mut bookings = self.list().await?;
        bookings.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_store::mock::MockClient;

    fn booking(id: &str, date: &str, time: &str) -> Reservation {
        Reservation {
            id: id.into(),
            name: "Ravi".into(),
            phone: "98100".into(),
            guests: 2,
            date: date.into(),
            time: time.into(),
            message: None,
            status: ReservationStatus::Pending,
        }
    }

    #[tokio::test]
    async fn by_date_sorts_by_date_then_time() {
        let mut mock = MockClient::<Reservation>::new();
        mock.expect_find().return_ok(vec![
            booking("c", "2026-11-03", "12:00"),
            booking("b", "2026-11-02", "20:00"),
            booking("a", "2026-11-02", "19:00"),
        ]);

        let client = ReservationClient::new(mock.client());
        let ids: Vec<_> = client
            .by_date()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
        mock.verify();
    }

    #[tokio::test]
    async fn set_status_returns_updated_booking() {
        let mut confirmed = booking("a", "2026-11-02", "19:00");
        confirmed.status = ReservationStatus::Confirmed;

        let mut mock = MockClient::<Reservation>::new();
        mock.expect_action("a".into()).return_ok(confirmed);

        let client = ReservationClient::new(mock.client());
        let result = client
            .set_status("a".into(), ReservationStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(result.status, ReservationStatus::Confirmed);
        mock.verify();
    }
}
