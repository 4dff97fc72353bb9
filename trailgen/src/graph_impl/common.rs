use log::info;
use std::mem::size_of;

// Node id
pub type Idx = u32;

/// Length of an edge in meters
pub type Length = f64;

/// Iterator over `(target, length)` pairs stored in two parallel arrays, limited to the
/// `[first, last)` range.
pub struct EdgeIterator<'a> {
  targets: &'a [Idx],
  lengths: &'a [f32],
  next: usize,
  last: usize,
}

impl<'a> EdgeIterator<'a> {
  pub fn new(targets: &'a [Idx], lengths: &'a [f32], first: Idx, last: Idx) -> Self {
    EdgeIterator {
      targets,
      lengths,
      next: first as usize,
      last: last as usize,
    }
  }
}

impl<'a> Iterator for EdgeIterator<'a> {
  type Item = (Idx, Length);

  fn next(&mut self) -> Option<Self::Item> {
    if self.next >= self.last {
      return None;
    }
    let index = self.next;
    self.next += 1;
    Some((self.targets[index], self.lengths[index] as Length))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let remaining = self.last.saturating_sub(self.next);
    (remaining, Some(remaining))
  }
}

/// Picks the cheapest of the parallel edges leading to `to`.
pub fn min_length<I: Iterator<Item = (Idx, Length)>>(edges: I, to: Idx) -> Option<Length> {
  edges
    .filter(|(target, _)| *target == to)
    .map(|(_, length)| length)
    .fold(None, |best: Option<Length>, length| match best {
      Some(b) if b <= length => Some(b),
      _ => Some(length),
    })
}

pub fn log_vector_size<T>(name: &str, v: &Vec<T>) {
  info!(
    "\t{}: count = {}/{}, element = {}, total = {} Mb",
    name,
    v.len(),
    v.capacity(),
    size_of::<T>(),
    v.capacity() * size_of::<T>() / 1024 / 1024
  );
}
