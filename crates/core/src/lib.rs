use crate::hide_and_seek::HideAndSeekGame;

pub mod hide_and_seek;
pub mod position;
pub mod shape;
pub mod spatial;

pub enum Game {
    HideAndSeek(HideAndSeekGame),
}
