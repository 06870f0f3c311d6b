//! Byte tape with a wrapping address register
//!
//! The address register ranges over `0..address_space`, which may be larger
//! than the physical tape. Addresses past the last cell alias back onto the
//! tape modulo its length, so `address` and `address + tape_len` name the
//! same cell.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    address: usize,
    address_space: usize,
}

impl Tape {
    pub fn new(tape_len: usize, address_space: usize) -> Self {
        Tape {
            cells: vec![0; tape_len],
            address: 0,
            address_space,
        }
    }

    pub fn address(&self) -> usize {
        self.address
    }

    /// Index of the physical cell the address register selects
    pub fn cell_index(&self) -> usize {
        self.address % self.cells.len()
    }

    pub fn get(&self) -> u8 {
        self.cells[self.cell_index()]
    }

    pub fn set(&mut self, value: u8) {
        let index = self.cell_index();
        self.cells[index] = value;
    }

    pub fn increment(&mut self) {
        let index = self.cell_index();
        self.cells[index] = self.cells[index].wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let index = self.cell_index();
        self.cells[index] = self.cells[index].wrapping_sub(1);
    }

    pub fn shift_right(&mut self) {
        self.address = (self.address + 1) % self.address_space;
    }

    pub fn shift_left(&mut self) {
        self.address = (self.address + self.address_space - 1) % self.address_space;
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
