#[cfg(target_arch = "x86")]
pub fn core_cycles() -> u64 {
    use core::arch::x86::{_mm_lfence, _rdtsc};
    unsafe {
        _mm_lfence();
        _rdtsc()
    }
}

#[cfg(target_arch = "x86_64")]
pub fn core_cycles() -> u64 {
    use core::arch::x86_64::{_mm_lfence, _rdtsc};
    unsafe {
        _mm_lfence();
        _rdtsc()
    }
}

#[cfg(target_arch = "aarch64")]
pub fn core_cycles() -> u64 {
    use core::arch::asm;
    let mut x: u64;
    unsafe {
        asm!("dsb sy", "mrs {}, pmccntr_el0", out(reg) x);
    }
    x
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
pub fn core_cycles() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_nanos() as u64)
}

// Runs `f` in ten batches and returns the median batch time divided by
// `ops` (the number of operations performed by one batch).
pub fn median_cycles<F: FnMut()>(ops: f64, mut f: F) -> f64 {
    let mut tt = [0u64; 10];
    for t in tt.iter_mut() {
        let begin = core_cycles();
        f();
        let end = core_cycles();
        *t = end.wrapping_sub(begin);
    }
    tt.sort();
    (tt[4] as f64) / ops
}

// Deterministic but non-constant seed bytes.
pub fn seed_bytes() -> [u8; 32] {
    let z = core_cycles();
    let mut b = [0u8; 32];
    for (i, c) in b.chunks_exact_mut(8).enumerate() {
        c.copy_from_slice(&z.wrapping_mul(2 * (i as u64) + 3).to_le_bytes());
    }
    b
}
