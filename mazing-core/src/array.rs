use std::ops;

/// Row-major 2D storage, one contiguous buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    rows: usize,
    columns: usize,
}

impl<T> Array2D<T> {
    /// Builds the array by calling `f(row, column)` for every slot in row-major order.
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut buf = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                buf.push(f(row, column));
            }
        }

        Self { buf, rows, columns }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn pos_to_idx(&self, row: usize, column: usize) -> Option<usize> {
        if row >= self.rows || column >= self.columns {
            return None;
        }

        Some(row * self.columns + column)
    }

    pub fn idx_to_pos(&self, idx: usize) -> Option<(usize, usize)> {
        if idx >= self.buf.len() {
            return None;
        }

        Some((idx / self.columns, idx % self.columns))
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        self.pos_to_idx(row, column).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        self.pos_to_idx(row, column)
            .and_then(move |i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_pos(i))
    }

    /// Rows as slices, top to bottom.
    pub fn iter_rows(&self) -> std::slice::Chunks<'_, T> {
        self.buf.chunks(self.columns.max(1))
    }
}

impl<T> ops::Index<usize> for Array2D<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.buf[index]
    }
}

impl<T> ops::IndexMut<usize> for Array2D<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.buf[index]
    }
}
