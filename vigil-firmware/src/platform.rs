//! STM32L0 implementations of the core platform traits
//!
//! Standby mode is the halt: SRAM and registers are lost, the RTC and its
//! backup registers survive, and wake-up comes from either the WKUP1 pin
//! (motion sensor) or the RTC wakeup timer. Resuming from standby goes
//! through reset, so every wake is a fresh `main`.

use embassy_stm32::pac;

use vigil_core::power::SleepPlan;
use vigil_core::traits::{Clock, RetainedSlot, SleepControl, WakeCauseSource};
use vigil_core::wake::WakeCause;

/// Days before each month in a non-leap year
const DAYS_BEFORE_MONTH: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Wake-cause read from the PWR status and RTC flags
///
/// The standby and wake-up flags are cleared as part of reading them, so
/// the cause is captured once at construction.
pub struct WakeRegisters {
    cause: WakeCause,
}

impl WakeRegisters {
    pub fn read() -> Self {
        let csr = pac::PWR.csr().read();
        let timer_fired = pac::RTC.isr().read().wutf();

        let cause = if !csr.sbf() {
            // No standby entry recorded: power-on or external reset
            WakeCause::ColdBoot
        } else if timer_fired {
            WakeCause::Timer
        } else if csr.wuf() {
            WakeCause::ExternalEdge
        } else {
            WakeCause::Other
        };

        // Clear the flags for the next cycle
        pac::PWR.cr().modify(|w| {
            w.set_cwuf(true);
            w.set_csbf(true);
        });
        pac::RTC.isr().modify(|w| w.set_wutf(false));

        Self { cause }
    }
}

impl WakeCauseSource for WakeRegisters {
    fn wake_cause(&mut self) -> WakeCause {
        self.cause
    }
}

/// Cooldown deadline in RTC backup registers BKP0R/BKP1R
///
/// Backup registers keep their contents through standby and reset; only a
/// full power loss (VDD and VBAT gone) clears them back to 0, which is
/// exactly the "no cooldown" state.
pub struct BackupSlot;

impl RetainedSlot for BackupSlot {
    fn load(&self) -> u64 {
        let lo = pac::RTC.bkpr(0).read().bkp() as u64;
        let hi = pac::RTC.bkpr(1).read().bkp() as u64;
        (hi << 32) | lo
    }

    fn store(&mut self, value: u64) {
        pac::RTC.bkpr(0).write(|w| w.set_bkp(value as u32));
        pac::RTC.bkpr(1).write(|w| w.set_bkp((value >> 32) as u32));
    }
}

/// Seconds since the RTC epoch, read from the calendar registers
///
/// The calendar keeps counting through standby, so this satisfies the
/// "monotonic until full power loss" clock contract.
pub struct RtcClock;

impl RtcClock {
    /// Seconds represented by the calendar date/time, relative to year 0
    /// of the RTC (the value only needs to be monotonic, not absolute)
    fn calendar_seconds() -> u64 {
        // Shadow registers: reading SSR/TR locks DR until DR is read
        let tr = pac::RTC.tr().read();
        let dr = pac::RTC.dr().read();

        let seconds = bcd(tr.st(), tr.su());
        let minutes = bcd(tr.mnt(), tr.mnu());
        let hours = bcd(tr.ht(), tr.hu());
        let day = bcd(dr.dt(), dr.du());
        let month = bcd(dr.mt() as u8, dr.mu());
        let year = bcd(dr.yt(), dr.yu());

        let leap_days = (year + 3) / 4; // RTC years 0-99, year 0 is a leap year
        let mut days = u64::from(year) * 365 + u64::from(leap_days);
        let month_index = month.clamp(1, 12) as usize - 1;
        days += u64::from(DAYS_BEFORE_MONTH[month_index]);
        if month > 2 && year % 4 == 0 {
            days += 1;
        }
        days += u64::from(day.saturating_sub(1));

        days * 86_400 + u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds)
    }
}

impl Clock for RtcClock {
    fn now(&self) -> u64 {
        Self::calendar_seconds()
    }

    fn delay_ms(&mut self, ms: u32) {
        embassy_time::block_for(embassy_time::Duration::from_millis(u64::from(ms)));
    }
}

fn bcd(tens: u8, units: u8) -> u32 {
    u32::from(tens) * 10 + u32::from(units)
}

/// Standby entry with exactly one wake source armed
pub struct Standby;

impl Standby {
    fn unlock_rtc() {
        pac::RTC.wpr().write(|w| w.set_key(0xCA));
        pac::RTC.wpr().write(|w| w.set_key(0x53));
    }

    fn arm_wakeup_timer(seconds: u64) {
        Self::unlock_rtc();
        // Timer must be disabled before WUTR is writable
        pac::RTC.cr().modify(|w| w.set_wute(false));
        while !pac::RTC.isr().read().wutwf() {}

        // ck_spre (1 Hz) selection; WUTR is 16-bit, clamp long cooldowns
        let ticks = seconds.min(u64::from(u16::MAX)) as u16;
        pac::RTC.wutr().write(|w| w.set_wut(ticks));
        pac::RTC.cr().modify(|w| {
            w.set_wucksel(0b100);
            w.set_wute(true);
            w.set_wutie(true);
        });
    }

    fn arm_wkup_pin() {
        // WKUP1 = PA0, rising edge, enabled in PWR
        pac::PWR.csr().modify(|w| w.set_ewup1(true));
    }
}

impl SleepControl for Standby {
    fn halt(&mut self, plan: SleepPlan) -> ! {
        match plan {
            SleepPlan::EdgeTrigger => Self::arm_wkup_pin(),
            SleepPlan::Timer { seconds } => Self::arm_wakeup_timer(seconds),
        }

        // Standby, not stop: PDDS set, wake-up flag cleared last
        pac::PWR.cr().modify(|w| {
            w.set_pdds(true);
            w.set_cwuf(true);
        });

        if let Some(mut cp) = cortex_m::Peripherals::take() {
            cp.SCB.set_sleepdeep();
        }

        loop {
            cortex_m::asm::wfi();
        }
    }
}
