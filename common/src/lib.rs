pub mod collision;
pub mod constants;
pub mod input;
pub mod movement;
pub mod objects;
pub mod player;
pub mod pool;
pub mod power_ups;
pub mod presentation;
pub mod scenery;
pub mod session;
pub mod shop;
pub mod spawning;

pub use input::InputEvent;
pub use objects::{Category, GameObject, Lane, ObjectId, PowerUpKind};
pub use presentation::{Hud, HudSnapshot, MemoryStore, NullScene, Scene, ScoreStore};
pub use session::{GameEvent, GameSession, Phase};
pub use shop::{PurchaseOutcome, ShopItem, Skin};
