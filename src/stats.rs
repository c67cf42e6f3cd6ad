//! Simulation statistics collection and reporting.
//!
//! This module tracks the metrics of a run. It provides:
//! 1. **Cycle and IPC:** Total ticks, retired instructions, and derived
//!    CPI/IPC.
//! 2. **Instruction mix:** Counts by category (ALU, load, store,
//!    branch/jump, system).
//! 3. **Pipeline events:** Data-hazard stalls, flushes, bubbles.
//! 4. **Traps:** Exceptions entered and interrupts delivered.

/// Simulation statistics tracking all performance counters.
#[derive(Clone, Debug, Default)]
pub struct SimStats {
    /// Total simulator ticks elapsed.
    pub cycles: u64,
    /// Non-bubble instructions retired.
    pub instructions_retired: u64,
    /// Bubbles retired (stall and flush slots included).
    pub bubbles_retired: u64,

    /// Stall cycles inserted for RAW hazards.
    pub stalls_data: u64,
    /// Pipeline flushes (taken control transfers, trap entries, MRET).
    pub flushes: u64,

    /// Traps taken (exceptions entered plus interrupts delivered).
    pub traps_taken: u64,
    /// Interrupts delivered (subset of `traps_taken`).
    pub interrupts_delivered: u64,

    /// ALU instructions retired.
    pub inst_alu: u64,
    /// Load instructions retired.
    pub inst_load: u64,
    /// Store instructions retired.
    pub inst_store: u64,
    /// Branch and jump instructions retired.
    pub inst_branch: u64,
    /// System and CSR instructions retired.
    pub inst_system: u64,
}

impl SimStats {
    /// Cycles per retired instruction.
    pub fn cpi(&self) -> f64 {
        let instr = self.instructions_retired.max(1);
        self.cycles as f64 / instr as f64
    }

    /// Retired instructions per cycle.
    pub fn ipc(&self) -> f64 {
        let cyc = self.cycles.max(1);
        self.instructions_retired as f64 / cyc as f64
    }

    /// Prints a summary of all counters to stdout.
    pub fn print(&self) {
        println!("==================================================");
        println!("RV32I PIPELINE SIMULATION STATISTICS");
        println!("==================================================");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_bubbles              {}", self.bubbles_retired);
        println!("sim_ipc                  {:.4}", self.ipc());
        println!("sim_cpi                  {:.4}", self.cpi());
        println!("--------------------------------------------------");
        println!("stalls.data              {}", self.stalls_data);
        println!("flushes                  {}", self.flushes);
        println!("traps.taken              {}", self.traps_taken);
        println!("traps.interrupts         {}", self.interrupts_delivered);
        println!("--------------------------------------------------");
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64| (n as f64 / instr) * 100.0;
        println!(
            "op.alu                   {} ({:.2}%)",
            self.inst_alu,
            pct(self.inst_alu)
        );
        println!(
            "op.load                  {} ({:.2}%)",
            self.inst_load,
            pct(self.inst_load)
        );
        println!(
            "op.store                 {} ({:.2}%)",
            self.inst_store,
            pct(self.inst_store)
        );
        println!(
            "op.branch                {} ({:.2}%)",
            self.inst_branch,
            pct(self.inst_branch)
        );
        println!(
            "op.system                {} ({:.2}%)",
            self.inst_system,
            pct(self.inst_system)
        );
        println!("==================================================");
    }
}
