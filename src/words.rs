//! Prompt words for new notes.
//!
//! Object writing starts from a single concrete object, so the list leans
//! on everyday physical things.

use rand::seq::SliceRandom;

/// Words a new note can be prompted with.
pub const WORDS: &[&str] = &[
    "acorn", "anchor", "anvil", "apple", "apron", "arrow", "axe", "badge", "balloon", "banjo",
    "barrel", "basket", "bell", "bench", "bicycle", "binoculars", "blanket", "boot", "bottle",
    "bow", "bridge", "broom", "brush", "bucket", "button", "cabinet", "cable", "cactus", "camera",
    "candle", "canoe", "canvas", "cart", "chain", "chair", "chalk", "chest", "chimney", "clock",
    "cloak", "coin", "comb", "compass", "cork", "crane", "crate", "crayon", "crown", "cup",
    "curtain", "cushion", "dagger", "dice", "dome", "door", "drawer", "drum", "easel", "engine",
    "envelope", "fan", "feather", "fence", "fiddle", "flag", "flask", "flute", "fork", "fountain",
    "frame", "funnel", "gate", "gear", "glacier", "glass", "globe", "glove", "gong", "hammer",
    "hammock", "handle", "harbor", "harp", "hat", "helmet", "hinge", "hook", "horn", "hourglass",
    "jar", "kayak", "kettle", "key", "kite", "knife", "knot", "ladder", "ladle", "lantern",
    "latch", "lens", "letter", "lever", "lighthouse", "lock", "locket", "loom", "magnet", "mask",
    "mast", "match", "mattress", "medal", "mirror", "mitten", "mop", "mosaic", "moth", "nail",
    "needle", "nest", "net", "oar", "organ", "ornament", "paddle", "padlock", "paintbrush",
    "palette", "parachute", "parcel", "pebble", "pedal", "pen", "pencil", "pendulum", "periscope",
    "piano", "pillar", "pillow", "pipe", "pitcher", "plank", "plate", "plow", "pocket", "pot",
    "pulley", "pump", "puppet", "quill", "raft", "rail", "rake", "reel", "ribbon", "ring", "robe",
    "rocket", "rope", "rudder", "rug", "ruler", "saddle", "sail", "sandal", "saw", "scale",
    "scarf", "scissors", "shell", "shield", "shovel", "shutter", "sieve", "signpost", "sled",
    "spade", "sphere", "spindle", "sponge", "spoon", "spring", "sprocket", "stool", "stove",
    "string", "suitcase", "sundial", "swing", "sword", "table", "tambourine", "tapestry",
    "teapot", "telescope", "tent", "thimble", "thread", "tile", "toolbox", "torch", "trumpet",
    "trunk", "tunnel", "turbine", "umbrella", "valve", "vase", "violin", "wagon", "wallet",
    "wand", "wheel", "wheelbarrow", "whistle", "windmill", "window", "wrench", "yarn",
];

/// Picks a prompt word uniformly at random.
pub fn random_word() -> &'static str {
    WORDS.choose(&mut rand::thread_rng()).copied().unwrap_or("lantern")
}
