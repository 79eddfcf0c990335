/// Port for one playable audio element of the pending list.
pub trait AudioElement {
    /// Start or resume playback from the current position.
    fn play(&mut self);

    /// Stop playback, keeping the current position.
    fn pause(&mut self);

    /// Move the position back to the start.
    fn rewind(&mut self);
}
