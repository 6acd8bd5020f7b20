//! PCD8544 protocol session
//!
//! [`Pcd8544`] owns the bus, the control lines, a coarse delay and the
//! framebuffer. Drawing happens on the framebuffer through
//! [`Pcd8544::display_mut`]; nothing reaches the panel until
//! [`Pcd8544::flush`] streams the whole buffer out.
//!
//! # Framing
//!
//! The D/C line selects how the controller interprets each byte. Commands
//! wait for the transmit queue to drain first so a mode switch can never
//! overtake data still in flight.

pub mod command;
pub mod state;

pub use command::{DisplayMode, InstructionSet};
pub use state::{SessionEvent, SessionState};

use stratum_hal::{CoarseDelay, ControlLines, SerialBus};

use crate::config::DisplayConfig;
use crate::error::DisplayError;
use crate::font::FontTable;
use crate::framebuffer::Display;
use crate::geometry::BUFFER_SIZE;
use crate::text::{cell_columns, FILL_NORMAL};

/// Session driving one PCD8544 panel
pub struct Pcd8544<B, C, D> {
    bus: B,
    lines: C,
    delay: D,
    config: DisplayConfig,
    display: Display,
    state: SessionState,
}

impl<B, C, D> Pcd8544<B, C, D>
where
    B: SerialBus,
    C: ControlLines,
    D: CoarseDelay,
{
    /// Create a session; nothing is sent until [`Pcd8544::initialize`]
    pub fn new(bus: B, lines: C, delay: D, config: DisplayConfig) -> Self {
        Self {
            bus,
            lines,
            delay,
            config,
            display: Display::new(),
            state: SessionState::Uninitialized,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Active configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// The framebuffer
    pub fn display(&self) -> &Display {
        &self.display
    }

    /// The framebuffer, for drawing
    pub fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }

    /// Give back the bus, control lines and delay
    pub fn release(self) -> (B, C, D) {
        (self.bus, self.lines, self.delay)
    }

    /// Send one command byte
    pub fn send_command(&mut self, code: u8) -> Result<(), DisplayError> {
        self.lines.set_command_mode();
        self.bus.wait_idle()?;
        self.bus.write(code)?;
        Ok(())
    }

    /// Send one data byte (lands in device memory at the device cursor)
    pub fn send_data(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.lines.set_data_mode();
        self.bus.write(byte)?;
        Ok(())
    }

    /// Bring the panel up
    ///
    /// Pulses reset, programs Vop, temperature coefficient and bias from
    /// the configuration, then runs [`Pcd8544::page_flip`]. Only valid once;
    /// a bring-up that fails part way leaves the session in
    /// [`SessionState::Initializing`].
    pub fn initialize(&mut self) -> Result<(), DisplayError> {
        self.advance(SessionEvent::Begin)?;

        self.bus.init()?;

        self.lines.assert_reset();
        self.delay.delay_ms(self.config.reset_pulse_ms);
        self.lines.release_reset();

        self.send_command(command::function_set(InstructionSet::Extended))?;
        self.send_command(command::set_vop(self.config.contrast))?;
        self.send_command(command::temperature_coefficient(self.config.temperature_coefficient))?;
        self.send_command(command::bias(self.config.bias))?;
        self.send_command(command::function_set(InstructionSet::Basic))?;

        self.page_flip()?;

        self.advance(SessionEvent::Complete)
    }

    /// Blank both the framebuffer and device memory
    ///
    /// The panel is held all-on while memory is cleared and switched to
    /// normal mode once the settle delay has passed.
    pub fn page_flip(&mut self) -> Result<(), DisplayError> {
        if self.state == SessionState::Uninitialized {
            return Err(DisplayError::NotReady);
        }

        self.send_command(command::display_control(DisplayMode::AllOn))?;
        self.display.clear();
        self.device_cursor(0, 0)?;
        self.zero_device_memory()?;
        self.delay.delay_ms(self.config.settle_ms);
        self.send_command(command::display_control(DisplayMode::Normal))
    }

    /// Stream the whole framebuffer to the panel
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        self.require_ready()?;

        #[cfg(feature = "defmt")]
        defmt::trace!("flush {} bytes", BUFFER_SIZE);

        self.device_cursor(0, 0)?;
        self.lines.set_data_mode();
        self.bus.write_all(self.display.contents())?;
        Ok(())
    }

    /// Move the device's own write address
    ///
    /// `x` wraps at 84 and `bank` at 6. The framebuffer cursor is not
    /// affected.
    pub fn set_device_cursor(&mut self, x: u8, bank: u8) -> Result<(), DisplayError> {
        self.require_ready()?;
        self.device_cursor(x, bank)
    }

    /// Zero device memory without touching the framebuffer
    pub fn clear_device(&mut self) -> Result<(), DisplayError> {
        self.require_ready()?;
        self.zero_device_memory()
    }

    /// Switch between blank, all-on, normal and inverse display
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), DisplayError> {
        self.require_ready()?;
        self.send_command(command::display_control(mode))
    }

    /// Change the operating voltage (7-bit Vop)
    pub fn set_contrast(&mut self, vop: u8) -> Result<(), DisplayError> {
        self.require_ready()?;
        self.config.contrast = vop & 0x7F;
        self.send_command(command::function_set(InstructionSet::Extended))?;
        self.send_command(command::set_vop(self.config.contrast))?;
        self.send_command(command::function_set(InstructionSet::Basic))
    }

    /// Send one character cell straight to the panel
    ///
    /// Bypasses the framebuffer; the next flush overwrites it.
    pub fn write_glyph_direct(&mut self, ch: u8) -> Result<(), DisplayError> {
        self.require_ready()?;
        let glyph = FontTable::glyph(ch)?;
        self.lines.set_data_mode();
        self.bus.write_all(&cell_columns(glyph, FILL_NORMAL))?;
        Ok(())
    }

    /// Send a string straight to the panel at the device cursor
    ///
    /// The string is checked before anything is sent.
    pub fn write_string_direct(&mut self, text: &str) -> Result<(), DisplayError> {
        self.require_ready()?;
        FontTable::check(text)?;
        for ch in text.bytes() {
            self.write_glyph_direct(ch)?;
        }
        Ok(())
    }

    /// Move the device cursor, then send a string straight to the panel
    pub fn write_line_direct(&mut self, x: u8, bank: u8, text: &str) -> Result<(), DisplayError> {
        self.require_ready()?;
        FontTable::check(text)?;
        self.device_cursor(x, bank)?;
        self.write_string_direct(text)
    }

    fn device_cursor(&mut self, x: u8, bank: u8) -> Result<(), DisplayError> {
        self.send_command(command::set_x(x))?;
        self.send_command(command::set_y(bank))
    }

    fn zero_device_memory(&mut self) -> Result<(), DisplayError> {
        self.device_cursor(0, 0)?;
        self.lines.set_data_mode();
        self.bus.write_all(&[0u8; BUFFER_SIZE])?;
        self.delay.delay_ms(self.config.clear_settle_ms);
        self.device_cursor(0, 0)
    }

    fn require_ready(&self) -> Result<(), DisplayError> {
        if self.state.is_ready() {
            Ok(())
        } else {
            Err(DisplayError::NotReady)
        }
    }

    fn advance(&mut self, event: SessionEvent) -> Result<(), DisplayError> {
        let next = self
            .state
            .transition(event)
            .ok_or(DisplayError::InvalidTransition)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("display session {} -> {}", self.state, next);

        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TextError;
    use crate::testing::{Log, NoDelay, RecordingBus, RecordingLines, Trace};
    use crate::text::GLYPH_ADVANCE;
    use stratum_hal::BusError;

    type TestSession = Pcd8544<RecordingBus, RecordingLines, NoDelay>;

    fn session(log: &Log) -> TestSession {
        Pcd8544::new(
            RecordingBus::new(log),
            RecordingLines::new(log),
            NoDelay::new(log),
            DisplayConfig::default(),
        )
    }

    fn ready_session(log: &Log) -> TestSession {
        let mut s = session(log);
        s.initialize().unwrap();
        log.clear();
        s
    }

    #[test]
    fn test_command_waits_for_idle() {
        let log = Log::new();
        let mut s = session(&log);

        s.send_command(0x21).unwrap();
        s.send_data(0x55).unwrap();

        assert_eq!(
            log.entries(),
            vec![Trace::WaitIdle, Trace::Command(0x21), Trace::Data(0x55)]
        );
    }

    #[test]
    fn test_initialize_sequence() {
        let log = Log::new();
        let mut s = session(&log);

        s.initialize().unwrap();

        let entries = log.entries();
        assert_eq!(
            &entries[..5],
            &[
                Trace::Init,
                Trace::ResetAsserted,
                Trace::DelayMs(125),
                Trace::ResetReleased,
                Trace::WaitIdle,
            ]
        );
        assert_eq!(
            log.commands(),
            vec![
                0x21, 0xC0, 0x04, 0x14, 0x20, // bring-up
                0x09, 0x80, 0x40, // all on, home
                0x80, 0x40, // clear: home
                0x80, 0x40, // clear: home again
                0x0C, // normal
            ]
        );
        assert_eq!(log.data(), vec![0u8; BUFFER_SIZE]);
        assert!(entries.contains(&Trace::DelayMs(625)));
        assert_eq!(s.state(), SessionState::Ready);
    }

    #[test]
    fn test_settle_before_normal_mode() {
        let log = Log::new();
        let mut s = session(&log);
        s.initialize().unwrap();

        let entries = log.entries();
        let n = entries.len();
        assert_eq!(
            &entries[n - 3..],
            &[Trace::DelayMs(125), Trace::WaitIdle, Trace::Command(0x0C)]
        );
    }

    #[test]
    fn test_initialize_uses_config() {
        let log = Log::new();
        let config = DisplayConfig {
            contrast: 0x3F,
            temperature_coefficient: 2,
            bias: 3,
            ..DisplayConfig::default()
        };
        let mut s = Pcd8544::new(
            RecordingBus::new(&log),
            RecordingLines::new(&log),
            NoDelay::new(&log),
            config,
        );

        s.initialize().unwrap();

        assert_eq!(&log.commands()[..5], &[0x21, 0xBF, 0x06, 0x13, 0x20]);
    }

    #[test]
    fn test_initialize_only_once() {
        let log = Log::new();
        let mut s = ready_session(&log);

        assert_eq!(s.initialize(), Err(DisplayError::InvalidTransition));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_failed_bring_up_is_not_ready() {
        let log = Log::new();
        let mut s = session(&log);
        log.fail_writes_after(2);

        assert_eq!(s.initialize(), Err(DisplayError::Bus(BusError::BusyTimeout)));
        assert_eq!(s.state(), SessionState::Initializing);
        assert_eq!(s.flush(), Err(DisplayError::NotReady));
        assert_eq!(s.initialize(), Err(DisplayError::InvalidTransition));
    }

    #[test]
    fn test_operations_need_ready() {
        let log = Log::new();
        let mut s = session(&log);

        assert_eq!(s.flush(), Err(DisplayError::NotReady));
        assert_eq!(s.page_flip(), Err(DisplayError::NotReady));
        assert_eq!(s.set_device_cursor(0, 0), Err(DisplayError::NotReady));
        assert_eq!(s.clear_device(), Err(DisplayError::NotReady));
        assert_eq!(s.set_display_mode(DisplayMode::Inverse), Err(DisplayError::NotReady));
        assert_eq!(s.set_contrast(0x20), Err(DisplayError::NotReady));
        assert_eq!(s.write_glyph_direct(b'A'), Err(DisplayError::NotReady));
        assert_eq!(s.write_string_direct("A"), Err(DisplayError::NotReady));
        assert_eq!(s.write_line_direct(0, 0, "A"), Err(DisplayError::NotReady));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_flush_streams_buffer() {
        let log = Log::new();
        let mut s = ready_session(&log);
        s.display_mut().buffer_mut().raw_write(0, 0x12);
        s.display_mut().buffer_mut().raw_write(BUFFER_SIZE - 1, 0x34);

        s.flush().unwrap();

        assert_eq!(log.commands(), vec![0x80, 0x40]);
        let data = log.data();
        assert_eq!(data.len(), BUFFER_SIZE);
        assert_eq!(&data[..], &s.display().contents()[..]);
        assert_eq!(data[0], 0x12);
        assert_eq!(data[BUFFER_SIZE - 1], 0x34);
    }

    #[test]
    fn test_flush_propagates_bus_error() {
        let log = Log::new();
        let mut s = ready_session(&log);
        log.fail_writes_after(10);

        assert_eq!(s.flush(), Err(DisplayError::Bus(BusError::BusyTimeout)));
        assert_eq!(log.data().len(), 8);
    }

    #[test]
    fn test_hello_row_end_to_end() {
        let log = Log::new();
        let mut s = session(&log);
        s.initialize().unwrap();
        log.clear();

        s.display_mut().write_row(5, 20, true, "H E L L O !").unwrap();
        s.flush().unwrap();

        assert_eq!(log.commands(), vec![0x80, 0x40]);
        let data = log.data();
        assert_eq!(data.len(), BUFFER_SIZE);

        let bank = |b: usize| &data[b * 84..(b + 1) * 84];
        for b in [0, 1, 4, 5] {
            assert!(bank(b).iter().all(|&byte| byte == 0), "bank {}", b);
        }

        // y = 20 sits four rows into bank 2: the row straddles banks 2 and 3
        let text_end = 5 + GLYPH_ADVANCE * 11;
        for x in (0..5).chain(text_end..84) {
            assert_eq!(bank(2)[x], 0xF0, "column {}", x);
            assert_eq!(bank(3)[x], 0x0F, "column {}", x);
        }

        let h = FontTable::glyph(b'H').unwrap();
        let cell = cell_columns(h, 0xFF);
        for (i, &column) in cell.iter().enumerate() {
            assert_eq!(bank(2)[5 + i], column << 4);
            assert_eq!(bank(3)[5 + i], column >> 4);
        }
    }

    #[test]
    fn test_aligned_row_end_to_end() {
        let log = Log::new();
        let mut s = ready_session(&log);

        s.display_mut().write_row(5, 16, true, "H E L L O !").unwrap();
        s.flush().unwrap();

        let data = log.data();
        let bank2 = &data[2 * 84..3 * 84];
        assert!(bank2[..5].iter().all(|&b| b == 0xFF));
        assert!(bank2[82..].iter().all(|&b| b == 0xFF));
        assert_eq!(bank2[5], 0xFF);
        assert_eq!(bank2[6], !FontTable::glyph(b'H').unwrap()[0]);
        assert!(data[3 * 84..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_device_cursor_wraps() {
        let log = Log::new();
        let mut s = ready_session(&log);

        s.set_device_cursor(90, 7).unwrap();

        assert_eq!(log.commands(), vec![0x80 | 6, 0x40 | 1]);
    }

    #[test]
    fn test_clear_device_keeps_framebuffer() {
        let log = Log::new();
        let mut s = ready_session(&log);
        s.display_mut().write_glyph(b'A').unwrap();

        s.clear_device().unwrap();

        assert_eq!(log.data(), vec![0u8; BUFFER_SIZE]);
        assert_ne!(s.display().contents()[1], 0);
    }

    #[test]
    fn test_page_flip_clears_and_homes() {
        let log = Log::new();
        let mut s = ready_session(&log);
        s.display_mut().set_pixel_cursor(40, 30);
        s.display_mut().write_byte(0xFF);

        s.page_flip().unwrap();

        assert!(s.display().contents().iter().all(|&b| b == 0));
        assert_eq!(s.display().text_cursor(), (0, 0));
        assert_eq!(log.commands().first(), Some(&0x09));
        assert_eq!(log.commands().last(), Some(&0x0C));
    }

    #[test]
    fn test_display_mode_and_contrast() {
        let log = Log::new();
        let mut s = ready_session(&log);

        s.set_display_mode(DisplayMode::Inverse).unwrap();
        s.set_contrast(0xFF).unwrap();

        assert_eq!(log.commands(), vec![0x0D, 0x21, 0xFF, 0x20]);
        assert_eq!(s.config().contrast, 0x7F);
    }

    #[test]
    fn test_direct_writes_bypass_framebuffer() {
        let log = Log::new();
        let mut s = ready_session(&log);

        s.write_line_direct(7, 2, "AA").unwrap();

        assert_eq!(log.commands(), vec![0x87, 0x42]);
        let cell = cell_columns(FontTable::glyph(b'A').unwrap(), 0);
        assert_eq!(log.data().len(), 2 * GLYPH_ADVANCE);
        assert_eq!(&log.data()[..GLYPH_ADVANCE], &cell[..]);
        assert!(s.display().contents().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_direct_write_rejects_before_sending() {
        let log = Log::new();
        let mut s = ready_session(&log);

        assert_eq!(
            s.write_line_direct(0, 0, "ok\x10"),
            Err(DisplayError::Text(TextError::OutOfRangeGlyph(0x10)))
        );
        assert_eq!(
            s.write_glyph_direct(0x80),
            Err(DisplayError::Text(TextError::OutOfRangeGlyph(0x80)))
        );
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_release_returns_parts() {
        let log = Log::new();
        let s = session(&log);
        let (mut bus, _lines, _delay) = s.release();
        assert_eq!(bus.read(), Err(BusError::ReceiveEmpty));
    }
}
