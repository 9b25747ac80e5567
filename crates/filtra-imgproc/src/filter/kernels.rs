use super::FilterError;

/// A square convolution kernel with an odd side length.
///
/// Weights are stored row-major. The kernel radius is `(side - 1) / 2`; it is
/// the thickness of the image border ring the convolution engine leaves
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2d {
    weights: Vec<f32>,
    side: usize,
}

impl Kernel2d {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Fails if `side` is zero or even, or if `weights.len() != side * side`.
    ///
    /// # Example
    ///
    /// ```
    /// use filtra_imgproc::filter::Kernel2d;
    ///
    /// let kernel = Kernel2d::new(3, vec![0.0; 9]).unwrap();
    /// assert_eq!(kernel.side(), 3);
    /// assert_eq!(kernel.radius(), 1);
    ///
    /// assert!(Kernel2d::new(2, vec![0.0; 4]).is_err());
    /// ```
    pub fn new(side: usize, weights: Vec<f32>) -> Result<Self, FilterError> {
        if side == 0 || side % 2 == 0 {
            return Err(FilterError::InvalidKernelShape(side));
        }
        if weights.len() != side * side {
            return Err(FilterError::InvalidKernelLength(weights.len(), side * side));
        }

        Ok(Self { weights, side })
    }

    /// Create a 3x3 kernel from a weight matrix.
    pub fn from_matrix(matrix: [[f32; 3]; 3]) -> Self {
        Self {
            weights: matrix.into_iter().flatten().collect(),
            side: 3,
        }
    }

    /// The side length of the kernel.
    pub fn side(&self) -> usize {
        self.side
    }

    /// The kernel radius, `(side - 1) / 2`.
    pub fn radius(&self) -> usize {
        (self.side - 1) / 2
    }

    /// The kernel weights as a flat row-major slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }

    /// Weight at kernel row `ky` and column `kx`.
    #[inline]
    pub fn weight(&self, ky: usize, kx: usize) -> f32 {
        self.weights[ky * self.side + kx]
    }
}

/// Create a 3x3 box blur kernel with uniform 1/9 weights.
pub fn box_blur_kernel_3x3() -> Kernel2d {
    Kernel2d::from_matrix([[1.0 / 9.0; 3]; 3])
}

/// Create a 3x3 gaussian blur kernel with 1/16 normalization.
pub fn gaussian_kernel_3x3() -> Kernel2d {
    Kernel2d::from_matrix([
        [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
        [2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0],
        [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
    ])
}

/// Create a 3x3 sharpening kernel.
///
/// The weights sum to one, so uniform regions are left unchanged.
pub fn sharpen_kernel_3x3() -> Kernel2d {
    Kernel2d::from_matrix([
        [-1.0, -1.0, -1.0],
        [-1.0, 9.0, -1.0],
        [-1.0, -1.0, -1.0],
    ])
}

/// Create the pair of 3x3 sobel kernels, (horizontal, vertical) gradient.
pub fn sobel_kernels_3x3() -> (Kernel2d, Kernel2d) {
    let kernel_x = Kernel2d::from_matrix([
        [-1.0, 0.0, 1.0],
        [-2.0, 0.0, 2.0],
        [-1.0, 0.0, 1.0],
    ]);
    let kernel_y = Kernel2d::from_matrix([
        [-1.0, -2.0, -1.0],
        [0.0, 0.0, 0.0],
        [1.0, 2.0, 1.0],
    ]);
    (kernel_x, kernel_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_validation() {
        assert!(matches!(
            Kernel2d::new(0, vec![]),
            Err(FilterError::InvalidKernelShape(0))
        ));
        assert!(matches!(
            Kernel2d::new(4, vec![0.0; 16]),
            Err(FilterError::InvalidKernelShape(4))
        ));
        assert!(matches!(
            Kernel2d::new(3, vec![0.0; 8]),
            Err(FilterError::InvalidKernelLength(8, 9))
        ));
        assert!(Kernel2d::new(1, vec![1.0]).is_ok());
        assert!(Kernel2d::new(5, vec![0.0; 25]).is_ok());
    }

    #[test]
    fn test_box_blur_kernel_3x3() {
        let kernel = box_blur_kernel_3x3();
        assert_eq!(kernel.radius(), 1);
        assert_eq!(kernel.as_slice(), &[1.0 / 9.0; 9]);
    }

    #[test]
    fn test_gaussian_kernel_3x3() {
        let kernel = gaussian_kernel_3x3();
        assert_eq!(kernel.weight(1, 1), 0.25);
        assert_eq!(kernel.as_slice().iter().sum::<f32>(), 1.0);
    }

    #[test]
    fn test_sharpen_kernel_3x3() {
        let kernel = sharpen_kernel_3x3();
        assert_eq!(kernel.weight(1, 1), 9.0);
        assert_eq!(kernel.as_slice().iter().sum::<f32>(), 1.0);
    }

    #[test]
    fn test_sobel_kernels_3x3() {
        let (kernel_x, kernel_y) = sobel_kernels_3x3();
        assert_eq!(
            kernel_x.as_slice(),
            &[-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0]
        );
        assert_eq!(
            kernel_y.as_slice(),
            &[-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0]
        );
    }
}
