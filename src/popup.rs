//! Exclusive popup overlays. At most one popup is active at a time; the
//! RSVP popup drives the gala reel as a side effect.

use crate::animation::Reel;
use crate::art;
use crate::calendar::EventDetails;

pub const RSVP_POPUP: &str = "rsvp";
pub const VENUE_POPUP: &str = "venue";
pub const PROGRAM_POPUP: &str = "program";

#[derive(Debug)]
pub struct Popup {
    pub id: &'static str,
    pub title: &'static str,
    pub body: String,
    pub active: bool,
}

#[derive(Debug)]
pub struct PopupRegistry {
    popups: Vec<Popup>,
    pub gala: Reel,
}

impl PopupRegistry {
    pub fn new(details: &EventDetails) -> Self {
        let popups = vec![
            Popup {
                id: RSVP_POPUP,
                title: "RSVP",
                body: "Sila sahkan kehadiran anda.\n\
                       Please confirm your attendance through the RSVP form\n\
                       shared with your invitation.\n\n\
                       The lanterns are lit and waiting."
                    .to_string(),
                active: false,
            },
            Popup {
                id: VENUE_POPUP,
                title: "Venue",
                body: format!(
                    "{}\n\nParking is available at the hotel.\nDress code: batik / smart casual.",
                    details.location
                ),
                active: false,
            },
            Popup {
                id: PROGRAM_POPUP,
                title: "Aturcara",
                body: "2.00 ptg   Ketibaan tetamu / Guests arrive\n\
                       2.30 ptg   Bacaan doa / Opening prayer\n\
                       3.00 ptg   Jamuan makan / Feast is served\n\
                       5.00 ptg   Ucapan penghargaan / Appreciation speeches\n\
                       10.00 mlm  Majlis bersurai / Close"
                    .to_string(),
                active: false,
            },
        ];

        Self { popups, gala: Reel::looped(&art::GALA_FRAMES) }
    }

    /// Toggle the named popup. Unknown ids are ignored. Every popup is
    /// closed first, so at most one ends up active.
    pub fn toggle(&mut self, id: &str) {
        let Some(target) = self.popups.iter().position(|p| p.id == id) else {
            return;
        };
        let was_active = self.popups[target].active;

        self.close_all();

        if !was_active {
            self.popups[target].active = true;
            if self.popups[target].id == RSVP_POPUP {
                self.gala.rewind();
                self.gala.play();
            }
        }
    }

    /// Close every popup, pausing the gala reel alongside the RSVP one.
    pub fn close_all(&mut self) {
        for popup in &mut self.popups {
            popup.active = false;
            if popup.id == RSVP_POPUP {
                self.gala.pause();
            }
        }
    }

    pub fn visible(&self) -> Option<&Popup> {
        self.popups.iter().find(|p| p.active)
    }

    #[cfg(test)]
    fn is_active(&self, id: &str) -> bool {
        self.popups.iter().any(|p| p.id == id && p.active)
    }
}
