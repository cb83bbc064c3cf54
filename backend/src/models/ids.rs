//! Primary-key newtypes for persisted records.

crate::define_id_type!(
    /// Referee identifier.
    i64,
    RefereeId
);

crate::define_id_type!(
    /// Game identifier.
    i64,
    GameId
);

crate::define_id_type!(
    /// Availability window identifier.
    i64,
    AvailabilityId
);

crate::define_id_type!(
    /// Referee-to-game assignment identifier.
    i64,
    AssignmentId
);
