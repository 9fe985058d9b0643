use super::ReservationError;
use crate::model::{
    optional, required, Reservation, ReservationCreate, ReservationId, ReservationStatus,
};
use async_trait::async_trait;
use resource_store::ActorEntity;

#[async_trait]
impl ActorEntity for Reservation {
    type Id = ReservationId;
    type Create = ReservationCreate;
    type Update = ();
    /// The new status; admins confirm, complete or cancel a booking.
    type Action = ReservationStatus;
    type ActionResult = Reservation;
    type Context = ();
    type Error = ReservationError;

    fn from_create_params(
        id: ReservationId,
        params: ReservationCreate,
    ) -> Result<Self, ReservationError> {
        if params.guests == 0 {
            return Err(ReservationError::ValidationError(
                "guests must be at least 1".to_string(),
            ));
        }
        let field = |name: &str, value: String| {
            required(name, value).map_err(ReservationError::ValidationError)
        };
        Ok(Self {
            id,
            name: field("name", params.name)?,
            phone: field("phone", params.phone)?,
            guests: params.guests,
            date: field("date", params.date)?,
            time: field("time", params.time)?,
            message: optional(params.message),
            status: ReservationStatus::Pending,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), ReservationError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        status: ReservationStatus,
        _ctx: &(),
    ) -> Result<Reservation, ReservationError> {
        self.status = status;
        Ok(self.clone())
    }
}
