//! デモ用のサンプル基板画像

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoImage {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

pub const DEMO_IMAGES: &[DemoImage] = &[
    DemoImage {
        id: "clean",
        name: "OSHW MCU Board (Pass)",
        url: "https://images.unsplash.com/photo-1555664424-778a1e5e1b48?q=80&w=800&auto=format&fit=crop",
        description: "Reference design for an Open Source microcontroller. Testing for standard solder wetting.",
    },
    DemoImage {
        id: "complex",
        name: "Industrial I/O Module",
        url: "https://images.unsplash.com/photo-1517077304055-6e89abbf09b0?q=80&w=800&auto=format&fit=crop",
        description: "High-density component layout. Searching for misalignment and thermal stress markers.",
    },
    DemoImage {
        id: "solder",
        name: "SMD Component Array",
        url: "https://images.unsplash.com/photo-1591405351990-4726e331f141?q=80&w=800&auto=format&fit=crop",
        description: "Close-up validation of 0603 and 0402 packages for bridging defects.",
    },
];
