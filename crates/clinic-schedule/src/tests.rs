//! Unit tests for clinic-schedule.

use clinic_core::{CustomerId, Session, SessionId, SessionLength, WorkerId};

use crate::{
    can_book, span_hours, BookingRequest, Denial, Facility, Occupant, ScheduleIndex, WorkSchedule,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sess(id: u32, worker: u16, day: u32, hour: u8, length: SessionLength, virt: bool) -> Session {
    Session::new(
        SessionId(id),
        WorkerId(worker),
        CustomerId(id),
        day,
        hour,
        length,
        virt,
    )
}

fn default_week() -> WorkSchedule {
    WorkSchedule::new(8, 17, vec![12]).unwrap()
}

fn one_room() -> Facility {
    Facility { room_count: 1, telehealth_unlocked: true }
}

fn request(day: u32, hour: u8, length: SessionLength, virt: bool) -> BookingRequest {
    BookingRequest { day, hour, length, is_virtual: virt }
}

// ── WorkSchedule ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod workweek {
    use super::*;

    #[test]
    fn valid_schedule() {
        let w = WorkSchedule::new(8, 17, vec![13, 12]).unwrap();
        assert_eq!(w.breaks(), &[12, 13]); // sorted
        assert!(w.is_working_hour(9));
        assert!(!w.is_working_hour(12)); // break
        assert!(!w.is_working_hour(17)); // past end
        assert!(w.covers(12));
    }

    #[test]
    fn rejects_inverted_hours() {
        assert!(WorkSchedule::new(17, 8, vec![]).is_err());
        assert!(WorkSchedule::new(8, 8, vec![]).is_err());
        assert!(WorkSchedule::new(8, 25, vec![]).is_err());
    }

    #[test]
    fn rejects_too_many_breaks() {
        assert!(WorkSchedule::new(8, 17, vec![9, 10, 11, 12]).is_err());
    }

    #[test]
    fn rejects_duplicate_breaks() {
        assert!(WorkSchedule::new(8, 17, vec![12, 12]).is_err());
    }

    #[test]
    fn rejects_break_outside_window() {
        assert!(WorkSchedule::new(8, 17, vec![7]).is_err());
        assert!(WorkSchedule::new(8, 17, vec![17]).is_err());
    }

    #[test]
    fn rejects_too_few_working_hours() {
        // 10..14 minus 2 breaks = 2 working hours < 3 minimum.
        assert!(WorkSchedule::new(10, 14, vec![11, 12]).is_err());
    }

    #[test]
    fn failed_update_keeps_current() {
        let mut w = default_week();
        assert!(w.update(17, 8, vec![]).is_err());
        assert_eq!(w, default_week());
        assert!(w.update(9, 15, vec![]).is_ok());
        assert_eq!(w.start_hour(), 9);
    }

    #[test]
    fn working_hours_iterator_skips_breaks() {
        let w = default_week();
        let hours: Vec<u8> = w.working_hours().collect();
        assert_eq!(hours, vec![8, 9, 10, 11, 13, 14, 15, 16]);
    }
}

// ── Slot model ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod slot {
    use super::*;

    #[test]
    fn span_correctness() {
        assert_eq!(span_hours(10, SessionLength::Standard), vec![10]);
        assert_eq!(span_hours(10, SessionLength::Extended), vec![10, 11]);
        assert_eq!(span_hours(10, SessionLength::Intensive), vec![10, 11, 12]);
    }

    #[test]
    fn empty_index() {
        let index = ScheduleIndex::new();
        assert_eq!(index.occupant_at(1, 10, WorkerId(0)), None);
        assert_eq!(index.in_person_count(1, 10), 0);
        assert_eq!(index.day_count(), 0);
    }

    #[test]
    fn rebuild_skips_finished_sessions() {
        let mut done = sess(0, 0, 1, 9, SessionLength::Standard, false);
        done.begin();
        done.advance_progress(50, clinic_core::SimTime { day: 1, hour: 9, minute: 50 });
        let mut cancelled = sess(1, 0, 1, 10, SessionLength::Standard, false);
        cancelled.cancel();
        let live = sess(2, 0, 1, 11, SessionLength::Standard, false);

        let index = ScheduleIndex::rebuild_from_sessions(&[done, cancelled, live]);
        assert_eq!(index.occupant_at(1, 9, WorkerId(0)), None);
        assert_eq!(index.occupant_at(1, 10, WorkerId(0)), None);
        assert_eq!(
            index.occupant_at(1, 11, WorkerId(0)),
            Some(Occupant::Session(SessionId(2)))
        );
        assert_eq!(index.in_person_count(1, 11), 1);
    }

    #[test]
    fn rebuild_is_idempotent_and_order_independent() {
        let a = sess(0, 0, 1, 9, SessionLength::Extended, false);
        let b = sess(1, 1, 1, 9, SessionLength::Standard, true);
        let c = sess(2, 0, 2, 14, SessionLength::Intensive, false);

        let fwd = ScheduleIndex::rebuild_from_sessions(&[a.clone(), b.clone(), c.clone()]);
        let rev = ScheduleIndex::rebuild_from_sessions(&[c, b, a]);
        assert_eq!(fwd, rev);

        let again = ScheduleIndex::rebuild_from_sessions(
            &[
                sess(0, 0, 1, 9, SessionLength::Extended, false),
                sess(1, 1, 1, 9, SessionLength::Standard, true),
                sess(2, 0, 2, 14, SessionLength::Intensive, false),
            ],
        );
        assert_eq!(fwd, again);
    }

    #[test]
    fn multi_hour_span_occupies_each_hour() {
        let index =
            ScheduleIndex::rebuild_from_sessions(&[sess(7, 3, 1, 9, SessionLength::Intensive, false)]);
        for hour in [9, 10, 11] {
            assert_eq!(
                index.occupant_at(1, hour, WorkerId(3)),
                Some(Occupant::Session(SessionId(7)))
            );
            assert_eq!(index.in_person_count(1, hour), 1);
        }
        assert_eq!(index.occupant_at(1, 12, WorkerId(3)), None);
    }

    #[test]
    fn virtual_sessions_use_no_rooms() {
        let index =
            ScheduleIndex::rebuild_from_sessions(&[sess(0, 0, 1, 9, SessionLength::Standard, true)]);
        assert_eq!(index.in_person_count(1, 9), 0);
        assert!(index.occupant_at(1, 9, WorkerId(0)).is_some());
    }

    #[test]
    fn remove_session_frees_span() {
        let s = sess(0, 0, 1, 9, SessionLength::Extended, false);
        let mut index = ScheduleIndex::rebuild_from_sessions(std::slice::from_ref(&s));
        index.remove_session(&s);
        assert_eq!(index.occupant_at(1, 9, WorkerId(0)), None);
        assert_eq!(index.occupant_at(1, 10, WorkerId(0)), None);
        assert_eq!(index.in_person_count(1, 9), 0);
    }

    #[test]
    fn hours_past_day_end_are_vacant() {
        // An intensive session at 23 would span 23–25; only the real hour
        // is indexed, and queries past it answer "empty" instead of
        // walking off the table.
        let s = sess(0, 0, 1, 23, SessionLength::Intensive, false);
        let mut index = ScheduleIndex::rebuild_from_sessions(std::slice::from_ref(&s));
        assert_eq!(
            index.occupant_at(1, 23, WorkerId(0)),
            Some(Occupant::Session(SessionId(0)))
        );
        assert_eq!(index.occupant_at(1, 24, WorkerId(0)), None);
        assert_eq!(index.in_person_count(1, 24), 0);

        index.remove_session(&s);
        assert_eq!(index.occupant_at(1, 23, WorkerId(0)), None);
        assert_eq!(index.in_person_count(1, 23), 0);
    }

    #[test]
    fn blocks_are_not_restored_by_rebuild() {
        let mut index = ScheduleIndex::new();
        index.block(1, 12, WorkerId(0), Occupant::Break);
        index.block(1, 14, WorkerId(0), Occupant::Training);
        assert_eq!(index.occupant_at(1, 12, WorkerId(0)), Some(Occupant::Break));
        assert_eq!(index.occupant_at(1, 14, WorkerId(0)), Some(Occupant::Training));

        let rebuilt = ScheduleIndex::rebuild_from_sessions(&[]);
        assert_eq!(rebuilt.occupant_at(1, 12, WorkerId(0)), None);
    }
}

// ── Booking constraints ───────────────────────────────────────────────────────

#[cfg(test)]
mod constraints {
    use super::*;

    #[test]
    fn free_slot_books() {
        let index = ScheduleIndex::new();
        let r = can_book(
            &one_room(),
            &index,
            &default_week(),
            WorkerId(0),
            &request(1, 10, SessionLength::Standard, false),
        );
        assert_eq!(r, Ok(()));
    }

    #[test]
    fn virtual_rejected_when_telehealth_locked() {
        let facility = Facility { room_count: 1, telehealth_unlocked: false };
        let r = can_book(
            &facility,
            &ScheduleIndex::new(),
            &default_week(),
            WorkerId(0),
            &request(1, 10, SessionLength::Standard, true),
        );
        assert_eq!(r, Err(Denial::TelehealthLocked));
    }

    #[test]
    fn one_room_facility_rejects_second_in_person() {
        // Scenario: an in-person session already sits at (day 1, hour 10) in
        // a 1-room facility.  Another in-person request by a *different*
        // worker at the same hour must fail on rooms; a virtual request at
        // the same hour succeeds.
        let index =
            ScheduleIndex::rebuild_from_sessions(&[sess(0, 0, 1, 10, SessionLength::Standard, false)]);

        let in_person = can_book(
            &one_room(),
            &index,
            &default_week(),
            WorkerId(1),
            &request(1, 10, SessionLength::Standard, false),
        );
        assert_eq!(in_person, Err(Denial::NoRooms { hour: 10 }));
        assert!(in_person.unwrap_err().to_string().contains("no rooms"));

        let virtual_ok = can_book(
            &one_room(),
            &index,
            &default_week(),
            WorkerId(1),
            &request(1, 10, SessionLength::Standard, true),
        );
        assert_eq!(virtual_ok, Ok(()));
    }

    #[test]
    fn rooms_checked_across_whole_span() {
        // Blocker occupies hour 11 only; an extended session at 10 spans
        // 10–11 and must be denied naming hour 11.
        let index =
            ScheduleIndex::rebuild_from_sessions(&[sess(0, 0, 1, 11, SessionLength::Standard, false)]);
        let r = can_book(
            &one_room(),
            &index,
            &default_week(),
            WorkerId(1),
            &request(1, 10, SessionLength::Extended, false),
        );
        assert_eq!(r, Err(Denial::NoRooms { hour: 11 }));
    }

    #[test]
    fn outside_work_hours_names_offending_hour() {
        let week = default_week(); // 8..17
        let r = can_book(
            &one_room(),
            &ScheduleIndex::new(),
            &week,
            WorkerId(0),
            &request(1, 16, SessionLength::Extended, true), // spans 16–17
        );
        assert_eq!(r, Err(Denial::OutsideHours { hour: 17 }));
    }

    #[test]
    fn break_hour_rejected() {
        let r = can_book(
            &one_room(),
            &ScheduleIndex::new(),
            &default_week(), // break at 12
            WorkerId(0),
            &request(1, 11, SessionLength::Extended, true), // spans 11–12
        );
        assert_eq!(r, Err(Denial::OnBreak { hour: 12 }));
    }

    #[test]
    fn late_day_span_past_midnight_is_denied() {
        // A worker window may legally end at 24; a 180-minute request at 22
        // spans 22–24, and hour 24 does not exist.  The room scan runs
        // first, so this must come back as a denial even with other
        // sessions already indexed that day.
        let week = WorkSchedule::new(15, 24, vec![]).unwrap();
        let index =
            ScheduleIndex::rebuild_from_sessions(&[sess(0, 0, 1, 15, SessionLength::Standard, false)]);
        let r = can_book(
            &one_room(),
            &index,
            &week,
            WorkerId(1),
            &request(1, 22, SessionLength::Intensive, false),
        );
        assert_eq!(r, Err(Denial::OutsideHours { hour: 24 }));
    }

    #[test]
    fn worker_double_booking_rejected() {
        let index =
            ScheduleIndex::rebuild_from_sessions(&[sess(0, 0, 1, 10, SessionLength::Standard, true)]);
        // Same worker, same hour, plenty of rooms: still denied.
        let facility = Facility { room_count: 10, telehealth_unlocked: true };
        let r = can_book(
            &facility,
            &index,
            &default_week(),
            WorkerId(0),
            &request(1, 10, SessionLength::Standard, false),
        );
        assert_eq!(r, Err(Denial::SlotTaken { hour: 10 }));
    }

    #[test]
    fn no_double_booking_invariant_holds_after_placements() {
        // Book greedily through the constraint check and verify the
        // committed calendar never exceeds capacity or double-books.
        let facility = Facility { room_count: 2, telehealth_unlocked: true };
        let week = default_week();
        let mut sessions: Vec<Session> = Vec::new();
        let mut index = ScheduleIndex::new();

        let candidates = [
            (0u32, 0u16, 9u8, false),
            (1, 1, 9, false),
            (2, 2, 9, false), // third in-person at 9: must be denied
            (3, 0, 9, true),  // same worker again: must be denied
            (4, 2, 9, true),  // virtual, free worker: fits
            (5, 0, 10, false),
        ];
        for (id, worker, hour, virt) in candidates {
            let req = request(1, hour, SessionLength::Standard, virt);
            if can_book(&facility, &index, &week, WorkerId(worker), &req).is_ok() {
                let s = sess(id, worker, 1, hour, SessionLength::Standard, virt);
                index.place_session(s.id, s.worker, s.day, s.hour, s.length, s.is_virtual);
                sessions.push(s);
            }
        }

        let booked: Vec<u32> = sessions.iter().map(|s| s.id.0).collect();
        assert_eq!(booked, vec![0, 1, 4, 5]);
        assert_eq!(index.in_person_count(1, 9), 2);

        // No two committed sessions share a (day, hour, worker) slot.
        for (i, a) in sessions.iter().enumerate() {
            for b in &sessions[i + 1..] {
                assert!(
                    !(a.worker == b.worker && a.day == b.day && a.hour == b.hour),
                    "{} and {} double-book worker {}",
                    a.id,
                    b.id,
                    a.worker
                );
            }
        }
    }
}

// ── Roster loader ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod roster {
    use std::io::Cursor;

    use clinic_core::CertId;

    use crate::{load_roster_reader, worker_by_id};

    use super::*;

    const CSV: &[u8] = b"\
worker_id,start_hour,end_hour,breaks,certifications\n\
1,9,16,,1\n\
0,8,17,12,0;2\n\
2,8,17,12;13,0\n\
";

    #[test]
    fn loads_and_sorts_by_id() {
        let roster = load_roster_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(roster.len(), 3);
        let ids: Vec<u16> = roster.iter().map(|w| w.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn parses_list_fields() {
        let roster = load_roster_reader(Cursor::new(CSV)).unwrap();
        let w0 = worker_by_id(&roster, WorkerId(0)).unwrap();
        assert_eq!(w0.workweek.breaks(), &[12]);
        assert_eq!(w0.certifications, vec![CertId(0), CertId(2)]);
        assert!(w0.holds(CertId(2)));
        assert!(!w0.holds(CertId(1)));

        let w1 = worker_by_id(&roster, WorkerId(1)).unwrap();
        assert!(w1.workweek.breaks().is_empty());
        assert_eq!(w1.certifications, vec![CertId(1)]);
    }

    #[test]
    fn duplicate_worker_id_errors() {
        let bad = b"\
worker_id,start_hour,end_hour,breaks,certifications\n\
0,8,17,,\n\
0,9,16,,\n\
";
        assert!(load_roster_reader(Cursor::new(bad.as_slice())).is_err());
    }

    #[test]
    fn invalid_workweek_in_row_errors() {
        let bad = b"\
worker_id,start_hour,end_hour,breaks,certifications\n\
0,17,8,,\n\
";
        assert!(load_roster_reader(Cursor::new(bad.as_slice())).is_err());
    }

    #[test]
    fn garbage_list_entry_errors() {
        let bad = b"\
worker_id,start_hour,end_hour,breaks,certifications\n\
0,8,17,noon,\n\
";
        assert!(load_roster_reader(Cursor::new(bad.as_slice())).is_err());
    }
}
