pub use self::{
    game_view::GameView,
    surface::{BufferSurface, render},
};

mod game_view;
mod surface;
